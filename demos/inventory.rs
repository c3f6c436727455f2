use sovran_collections::{
    ArrayInterface, Collection, CollectionError, CollectionInterface, MapInterface, Object,
    Set, Sort, TypedMap, Value,
};

// Example object: a product with a name property and a price getter
#[derive(Debug)]
struct Product {
    name: String,
    price: i64,
    category: String,
}

impl Object for Product {
    fn class_name(&self) -> &str {
        "Product"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(self.name.clone().into()),
            "category" => Some(self.category.clone().into()),
            _ => None,
        }
    }

    fn call_method(&self, name: &str) -> Option<Value> {
        match name {
            "getPrice" => Some(self.price.into()),
            _ => None,
        }
    }
}

fn product(name: &str, price: i64, category: &str) -> Value {
    Value::object(Product {
        name: name.to_string(),
        price,
        category: category.to_string(),
    })
}

fn main() -> Result<(), CollectionError> {
    // A collection that only accepts products
    let mut products = Collection::new("Product");
    products.add(product("Keyboard", 45, "input"))?;
    products.add(product("Monitor", 180, "display"))?;
    products.add(product("Mouse", 20, "input"))?;

    // Anything else is rejected
    match products.add("Desk") {
        Ok(_) => println!("This shouldn't happen - strings aren't products"),
        Err(e) => println!("Rejected: {}", e),
    }

    // Sort by a getter, cheapest first
    let by_price = products.sort(Some("getPrice"), Sort::Ascending)?;
    for name in by_price.column("name")? {
        println!("Product: {}", name);
    }

    // Filter on a property
    let input = products.where_eq(Some("category"), &Value::from("input"))?;
    println!("Input devices: {}", input.count());

    // Total price through reduce
    let total = products.reduce(
        |acc, p| {
            p.as_object()
                .and_then(|o| o.downcast_ref::<Product>())
                .map_or(acc, |p| acc + p.price)
        },
        0,
    );
    println!("Total stock value: {}", total);

    // Unique categories
    let category_names = products.map(|p| {
        p.as_object()
            .and_then(|o| o.downcast_ref::<Product>())
            .map(|p| p.category.clone())
    });
    let categories = Set::from_array("string", category_names.to_array())?;
    println!("Categories: {}", categories.count());

    // Stock levels keyed by product name
    let mut stock = TypedMap::new("string", "int");
    stock.put("Keyboard", 12)?;
    stock.put("Mouse", 40)?;

    match stock.put("Monitor", "plenty") {
        Ok(_) => println!("This shouldn't happen - stock levels are ints"),
        Err(CollectionError::InvalidArgument(msg)) => println!("Rejected: {}", msg),
        Err(e) => println!("Unexpected error: {}", e),
    }

    let monitors = stock.get_or("Monitor", 0)?;
    println!("Monitors in stock: {}", monitors);

    Ok(())
}
