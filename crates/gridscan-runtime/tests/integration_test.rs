mod dummy;

use crate::dummy::{init_client, test_client, DummyDevice, DummyElementwiseAddition};

#[test_log::test]
fn created_resource_is_the_same_when_read() {
    let client = test_client(&DummyDevice);
    let resource = Vec::from([0, 1, 2]);
    let handle = client.create(&resource);

    let obtained_resource = client.read_one(handle).unwrap();

    assert_eq!(resource, obtained_resource)
}

#[test_log::test]
fn empty_allocates_memory() {
    let client = test_client(&DummyDevice);
    let size = 4;
    let handle = client.empty(size);
    let empty_resource = client.read_one(handle).unwrap();

    assert_eq!(empty_resource.len(), 4);
}

#[test_log::test]
fn execute_elementwise_addition() {
    let client = test_client(&DummyDevice);
    let lhs = client.create(&[0, 1, 2]);
    let rhs = client.create(&[4, 4, 4]);
    let out = client.empty(3);

    client
        .execute(
            Box::new(DummyElementwiseAddition),
            vec![lhs.binding(), rhs.binding(), out.clone().binding()],
        )
        .unwrap();

    let obtained_resource = client.read_one(out).unwrap();

    assert_eq!(obtained_resource, Vec::from([4, 5, 6]))
}

#[test_log::test]
fn dropped_handles_are_released() {
    // A dedicated client so that other tests don't share its memory.
    let client = init_client();
    let kept = client.create(&[1, 2, 3, 4]);
    let dropped = client.empty(16);

    assert_eq!(client.memory_usage().bytes_in_use, 20);

    core::mem::drop(dropped);
    client.memory_cleanup();

    let usage = client.memory_usage();
    assert_eq!(usage.number_allocs, 1);
    assert_eq!(usage.bytes_in_use, 4);
    assert_eq!(client.read_one(kept).unwrap(), vec![1, 2, 3, 4]);
}
