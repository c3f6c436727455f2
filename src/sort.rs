use crate::error::CollectionError;
use std::fmt;
use std::str::FromStr;

/// Sort direction for [`CollectionInterface::sort`](crate::CollectionInterface::sort)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sort {
    #[default]
    Ascending,
    Descending,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Ascending => "asc",
            Sort::Descending => "desc",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sort {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Sort::Ascending),
            "desc" => Ok(Sort::Descending),
            other => Err(CollectionError::InvalidArgument(format!(
                "Unknown sort order '{}'",
                other
            ))),
        }
    }
}
