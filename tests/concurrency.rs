#![cfg(feature = "serde_json")]

mod common;

use common::*;
use std::sync::Arc;
use std::thread;
use strict_record::json::{from_str, to_string};
use strict_record::Decoder;

#[test]
fn shared_decoder() {
    let decoder = Arc::new(Decoder::default());
    let object = test_object_with_generics();
    let text = Arc::new(to_string(&object).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let decoder = Arc::clone(&decoder);
            let text = Arc::clone(&text);
            thread::spawn(move || {
                (0..50)
                    .map(|_| from_str::<TestObjectWithGenerics>(&decoder, &text))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            assert_eq!(result.unwrap(), object);
        }
    }

    // TestObjectWithGenerics and TestObject, each built once.
    assert_eq!(decoder.schemas().len(), 2);
}
