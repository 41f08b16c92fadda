//! Producer/consumer tests across threads for both mutex bindings.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use motnet_sync::{Fifo, FifoByte, FifoError, RtMutex, SharedMutex, SpinMutex, TaskMutex, WAIT_FOREVER};

const ITEMS: u32 = 5_000;

fn run_producer_consumer(mutex: SharedMutex) {
    let fifo = Arc::new(Fifo::new(4, 16, Some(mutex)).expect("create"));

    let producer = {
        let fifo = Arc::clone(&fifo);
        thread::spawn(move || {
            let mut next = 0u32;
            while next < ITEMS {
                match fifo.put(&next.to_le_bytes(), WAIT_FOREVER) {
                    Ok(()) => next += 1,
                    Err(FifoError::Full) => thread::yield_now(),
                    Err(e) => panic!("producer: {e}"),
                }
            }
        })
    };

    let mut expected = 0u32;
    while expected < ITEMS {
        let got = fifo.get(WAIT_FOREVER, |item| {
            u32::from_le_bytes([item[0], item[1], item[2], item[3]])
        });
        match got {
            Ok(value) => {
                assert_eq!(value, expected, "items out of order");
                fifo.rem(WAIT_FOREVER).expect("rem");
                expected += 1;
            }
            Err(FifoError::Empty) => thread::yield_now(),
            Err(e) => panic!("consumer: {e}"),
        }
    }

    producer.join().expect("producer thread");
    assert_eq!(fifo.size(WAIT_FOREVER), Ok(0));
}

#[test]
fn task_mutex_preserves_order() {
    run_producer_consumer(Arc::new(TaskMutex::new()));
}

#[test]
fn spin_mutex_preserves_order() {
    run_producer_consumer(Arc::new(SpinMutex::new()));
}

#[test]
fn byte_fifo_shared_between_threads() {
    let fifo = Arc::new(FifoByte::new(8, Some(Arc::new(TaskMutex::new()))).expect("create"));

    let producer = {
        let fifo = Arc::clone(&fifo);
        thread::spawn(move || {
            for b in 0..=255u8 {
                while fifo.put(b, WAIT_FOREVER) == Err(FifoError::Full) {
                    thread::yield_now();
                }
            }
        })
    };

    let mut received = Vec::with_capacity(256);
    while received.len() < 256 {
        match fifo.get(WAIT_FOREVER) {
            Ok(b) => {
                received.push(b);
                fifo.rem(WAIT_FOREVER).expect("rem");
            }
            Err(FifoError::Empty) => thread::yield_now(),
            Err(e) => panic!("consumer: {e}"),
        }
    }
    producer.join().expect("producer thread");

    let expected: Vec<u8> = (0..=255u8).collect();
    assert_eq!(received, expected);
}

#[test]
fn lock_contention_distinguished_from_full() {
    let mutex = Arc::new(TaskMutex::new());
    let fifo = FifoByte::new(1, Some(mutex.clone())).expect("create");
    fifo.put(1, WAIT_FOREVER).expect("put");

    mutex.take(WAIT_FOREVER).expect("take");
    assert_eq!(fifo.put(2, Duration::from_millis(5)), Err(FifoError::Timeout));
    mutex.release().expect("release");

    assert_eq!(fifo.put(2, Duration::from_millis(5)), Err(FifoError::Full));
}
