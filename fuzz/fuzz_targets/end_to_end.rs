#![no_main]

use libfuzzer_sys::fuzz_target;
use quilt::{Compose, Delta, Transform};

fuzz_target!(|data: (Delta, Delta, Delta)| {
    let (before, alice, bob) = data;

    let alice_bob = before
        .compose(&alice)
        .compose(&alice.transform(&bob, true));

    let bob_alice = before
        .compose(&bob)
        .compose(&bob.transform(&alice, false));

    assert_eq!(alice_bob, bob_alice);
});
