use sovran_collections::{
    ArrayInterface, CollectionError, DoubleEndedQueue, DoubleEndedQueueInterface, MapInterface,
    NamedParameterMap, Queue, QueueInterface,
};

fn main() -> Result<(), CollectionError> {
    // Jobs are processed in the order they arrive
    let mut jobs = Queue::new("string");
    jobs.add("build")?;
    jobs.add("test")?;
    jobs.add("deploy")?;

    // offer() reports a rejected job instead of failing
    if !jobs.offer(42) {
        println!("Ignored a job that wasn't a string");
    }

    while let Some(job) = jobs.poll() {
        println!("Running job: {}", job);
    }

    // element() fails once the queue is drained
    match jobs.element() {
        Ok(job) => println!("This shouldn't happen - found {}", job),
        Err(CollectionError::NoSuchElement(msg)) => println!("Done: {}", msg),
        Err(e) => println!("Unexpected error: {}", e),
    }

    // Urgent work jumps the line in a deque
    let mut work = DoubleEndedQueue::new("string");
    work.add_last("refactor")?;
    work.add_last("docs")?;
    work.add_first("hotfix")?;

    println!("Next up: {}", work.first_element()?);
    println!("Last in line: {}", work.last_element()?);

    // Drop the least important task
    if let Some(task) = work.poll_last() {
        println!("Postponed: {}", task);
    }
    println!("Remaining tasks: {}", work.count());

    // Job options with a fixed schema
    let mut options = NamedParameterMap::new([("retries", "int"), ("verbose", "bool")]);
    options.put("retries", 3)?;
    options.put("verbose", false)?;

    match options.put("timeout", 30) {
        Ok(_) => println!("This shouldn't happen - timeout isn't a declared option"),
        Err(e) => println!("Rejected: {}", e),
    }

    for (name, value) in &options {
        println!("Option {} = {}", name, value);
    }

    Ok(())
}
