#![cfg(feature = "host")]

use gridscan::{
    host::HostRuntime,
    scan::{associative_scan, instructions::Max, ScanError, ScanStrategy},
    ConfigurationError, Runtime, TensorHandle,
};
use pretty_assertions::assert_eq;

#[test]
fn running_maximum_over_the_middle_axis() {
    let client = HostRuntime::client(&Default::default());
    let data = [
        3., 1., 4., 1., 5., 9., //
        2., 6., 5., 3., 5., 8.,
    ];
    let input = TensorHandle::<HostRuntime>::from_data(&client, &data, [2, 3, 2]).unwrap();

    let output = associative_scan(
        &client,
        input.as_ref(),
        Max,
        1,
        true,
        Some(ScanStrategy::tree()),
    )
    .unwrap();

    assert_eq!(
        output.read(&client).unwrap(),
        vec![
            3., 1., 4., 1., 5., 9., //
            2., 6., 5., 6., 5., 8.,
        ]
    );
}

#[test]
fn empty_axis_is_rejected() {
    let client = HostRuntime::client(&Default::default());
    let input = TensorHandle::<HostRuntime>::from_data(&client, &[], [3, 0]).unwrap();

    let result = associative_scan(&client, input.as_ref(), Max, 1, false, None);

    assert_eq!(
        result.unwrap_err(),
        ScanError::Configuration(ConfigurationError::EmptyAxis { axis: 1 })
    );
}
