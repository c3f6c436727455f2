mod common;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sovran_collections::{
    ArrayInterface, CollectionError, DoubleEndedQueue, DoubleEndedQueueInterface, Key, Queue,
    QueueInterface, Value,
};

fn drain(queue: &mut impl QueueInterface) -> Vec<i64> {
    std::iter::from_fn(|| queue.poll())
        .filter_map(|v| v.as_int())
        .collect()
}

#[test]
fn test_fifo_order() {
    let mut queue = Queue::new("int");
    queue.add(1).unwrap();
    queue.add(2).unwrap();
    queue.add(3).unwrap();

    assert_eq!(queue.peek().and_then(Value::as_int), Some(1));
    assert_eq!(drain(&mut queue), vec![1, 2, 3]);
    assert!(queue.is_empty());
}

#[test]
fn test_empty_queue_behaviour() {
    let mut queue = Queue::new("int");
    assert!(queue.peek().is_none());
    assert!(queue.poll().is_none());

    let err = queue.element().unwrap_err();
    assert_eq!(
        err,
        CollectionError::NoSuchElement("Can't return element from Queue. Queue is empty.".to_string())
    );
    assert!(queue.remove().unwrap_err().is_no_such_element());
}

#[test]
fn test_null_head_is_still_an_element() {
    let mut queue = Queue::new("mixed");
    queue.add(Value::Null).unwrap();

    assert!(queue.element().unwrap().is_null());
    assert!(queue.remove().unwrap().is_null());
    assert!(queue.remove().is_err());
}

#[test]
fn test_add_and_offer_check_type() {
    let mut queue = Queue::new("string");
    let err = queue.add(1).unwrap_err();
    assert_eq!(
        err,
        CollectionError::InvalidArgument("Value must be of type string; value is 1".to_string())
    );

    assert!(!queue.offer(1));
    assert!(queue.offer("ok"));
    assert_eq!(queue.count(), 1);
}

#[test]
fn test_keys_are_ignored_on_write() {
    let mut queue = Queue::new("int");
    queue.set("front", 1).unwrap();
    queue.set(10, 2).unwrap();

    let keys: Vec<Key> = queue.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, vec![Key::Int(0), Key::Int(1)]);
}

#[test]
fn test_from_values() {
    let mut queue = Queue::from_values("int", [4, 5]).unwrap();
    assert_eq!(drain(&mut queue), vec![4, 5]);

    assert!(Queue::from_values("int", vec![Value::Int(1), Value::from("x")]).is_err());
}

#[test]
fn test_deque_head_and_tail() {
    let mut deque = DoubleEndedQueue::new("int");
    deque.add_last(2).unwrap();
    deque.add_first(1).unwrap();
    deque.add_last(3).unwrap();

    assert_eq!(deque.peek_first().and_then(Value::as_int), Some(1));
    assert_eq!(deque.peek_last().and_then(Value::as_int), Some(3));

    assert_eq!(deque.remove_last().unwrap().as_int(), Some(3));
    assert_eq!(deque.remove_first().unwrap().as_int(), Some(1));
    assert_eq!(deque.first_element().unwrap().as_int(), Some(2));
    assert_eq!(deque.last_element().unwrap().as_int(), Some(2));
}

#[test]
fn test_deque_head_operations_do_not_disturb_tail() {
    let mut deque = DoubleEndedQueue::new("string");
    deque.add_last("tail").unwrap();
    deque.add_first("a").unwrap();
    deque.poll_first();
    deque.add_first("b").unwrap();

    assert_eq!(deque.peek_last().and_then(Value::as_str), Some("tail"));
    assert_eq!(deque.peek_first().and_then(Value::as_str), Some("b"));
}

#[test]
fn test_deque_add_first_renumbers_keys() {
    let mut deque = DoubleEndedQueue::from_values("int", [2, 3]).unwrap();
    deque.add_first(1).unwrap();

    let keys: Vec<Key> = deque.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, vec![Key::Int(0), Key::Int(1), Key::Int(2)]);
    assert_eq!(drain(&mut deque), vec![1, 2, 3]);
}

#[test]
fn test_deque_poll_last_releases_key() {
    let mut deque = DoubleEndedQueue::from_values("int", [1, 2, 3]).unwrap();
    assert_eq!(deque.poll_last().and_then(|v| v.as_int()), Some(3));

    deque.add(4).unwrap();
    let keys: Vec<Key> = deque.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, vec![Key::Int(0), Key::Int(1), Key::Int(2)]);
}

#[test]
fn test_deque_empty() {
    let mut deque = DoubleEndedQueue::new("int");
    assert!(deque.poll_first().is_none());
    assert!(deque.poll_last().is_none());
    assert!(deque.peek_last().is_none());
    assert!(deque.remove_last().unwrap_err().is_no_such_element());
    assert!(deque.last_element().is_err());
    assert!(deque.first_element().is_err());
}

#[test]
fn test_deque_offer_checks_type() {
    let mut deque = DoubleEndedQueue::new("int");
    assert!(!deque.offer_first("x"));
    assert!(!deque.offer_last("x"));
    assert!(deque.offer_first(1));
    assert!(deque.offer_last(2));
    assert!(deque.add_first("x").is_err());
    assert_eq!(deque.count(), 2);
}

proptest! {
    #[test]
    fn prop_queue_is_fifo(values in proptest::collection::vec(any::<i64>(), 0..50)) {
        let mut queue = Queue::from_values("int", values.iter().copied()).unwrap();
        prop_assert_eq!(drain(&mut queue), values);
    }

    #[test]
    fn prop_deque_ends_track_last_add(
        ops in proptest::collection::vec((any::<bool>(), any::<i64>()), 1..40)
    ) {
        let mut deque = DoubleEndedQueue::new("int");
        for (front, value) in ops {
            if front {
                deque.add_first(value).unwrap();
                prop_assert_eq!(deque.peek_first().and_then(Value::as_int), Some(value));
            } else {
                deque.add_last(value).unwrap();
                prop_assert_eq!(deque.peek_last().and_then(Value::as_int), Some(value));
            }
        }
    }
}
