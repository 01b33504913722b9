use crate::{associative_scan, instructions::ScanInstruction, ScanStrategy};
use gridscan_core::prelude::*;
use rand::{distr::Uniform, Rng, SeedableRng};

#[macro_export]
macro_rules! testgen_scan_simple {
    () => {
        mod scan_simple {
            use super::*;
            use $crate::instructions::*;

            $crate::testgen_scan_simple!(@group: [sizes=[1, 2, 10, 17, 64, 100, 128, 256, 1_000, 4097]]: { Add, Max, Min });
            $crate::testgen_scan_simple!(@group: [sizes=[1, 7, 16, 24]]: { Mul });
        }
    };
    (@group: [sizes=$sizes:expr]: { $($instr:ident),* }) => {
        $(
            $crate::testgen_scan_simple!(@test: $sizes, $instr, exclusive, false, sequential);
            $crate::testgen_scan_simple!(@test: $sizes, $instr, inclusive, true, sequential);
            $crate::testgen_scan_simple!(@test: $sizes, $instr, exclusive, false, tree);
            $crate::testgen_scan_simple!(@test: $sizes, $instr, inclusive, true, tree);
        )*
    };
    (@test: $sizes:expr, $instr:ident, $kind:ident, $inclusive:literal, $strategy:ident) => {
        paste::paste! {
            #[test]
            fn [<test_ $instr:lower _ $kind _ $strategy>]() {
                use $crate::tests::Runtime;

                let client = TestRuntime::client(&Default::default());
                for size in $sizes {
                    let test = $crate::tests::simple::TestCase {
                        shape: vec![size],
                        axis: 0,
                        inclusive: $inclusive,
                        strategy: $crate::ScanStrategy::$strategy(),
                    };
                    test.test_scan::<TestRuntime, _>(&client, $instr);
                }
            }
        }
    };
}

#[macro_export]
macro_rules! testgen_scan_axes {
    () => {
        mod scan_axes {
            use super::*;

            $crate::testgen_scan_axes!(@test: exclusive, false, sequential);
            $crate::testgen_scan_axes!(@test: inclusive, true, sequential);
            $crate::testgen_scan_axes!(@test: exclusive, false, tree);
            $crate::testgen_scan_axes!(@test: inclusive, true, tree);
        }
    };
    (@test: $kind:ident, $inclusive:literal, $strategy:ident) => {
        paste::paste! {
            #[test]
            fn [<test_every_axis_ $kind _ $strategy>]() {
                use $crate::tests::Runtime;

                let client = TestRuntime::client(&Default::default());
                let shapes = [vec![6, 4], vec![3, 5, 8], vec![2, 3, 4, 6], vec![4, 2, 16, 1]];
                for shape in shapes {
                    for axis in 0..shape.len() {
                        let test = $crate::tests::simple::TestCase {
                            shape: shape.clone(),
                            axis,
                            inclusive: $inclusive,
                            strategy: $crate::ScanStrategy::$strategy(),
                        };
                        test.test_scan::<TestRuntime, _>(&client, $crate::instructions::Add);
                    }
                }
            }
        }
    };
}

/// A scan of random data compared against a host reference.
#[derive(Debug)]
pub struct TestCase {
    pub shape: Vec<usize>,
    pub axis: usize,
    pub inclusive: bool,
    pub strategy: ScanStrategy,
}

impl TestCase {
    pub fn test_scan<R: Runtime, I: ScanInstruction + Clone>(
        &self,
        client: &ComputeClient<R::Server, R::Channel>,
        instruction: I,
    ) {
        let len = self.shape.iter().product::<usize>();
        let data = rand::rngs::StdRng::seed_from_u64(1234)
            .sample_iter(Uniform::<i64>::new(1, 20).unwrap())
            .take(len)
            .map(|v| v as f32)
            .collect::<Vec<_>>();
        let expected = self.reference_scan(&data, &instruction);

        let input = TensorHandle::<R>::from_data(client, &data, self.shape.clone()).unwrap();
        let output = associative_scan::<R, I>(
            client,
            input.as_ref(),
            instruction,
            self.axis,
            self.inclusive,
            Some(self.strategy),
        )
        .unwrap();

        pretty_assertions::assert_eq!(output.shape, input.shape);
        let actual = output.read(client).unwrap();
        super::assert_approx_eq(&expected, &actual, 1e-4);
    }

    /// Scans every lane along the axis with an iterator fold.
    pub fn reference_scan<I: ScanInstruction>(&self, data: &[f32], instruction: &I) -> Vec<f32> {
        let shape = Shape::new(self.shape.clone());
        let lanes = shape.with_dim(self.axis, 1);
        let mut output = vec![0.0; data.len()];

        for lane in 0..lanes.num_elements() {
            let start = lanes.coordinate(lane);
            let offsets = (0..shape[self.axis])
                .map(|i| shape.offset(&start.with(self.axis, i)))
                .collect::<Vec<_>>();
            let scanned = offsets.iter().scan(instruction.identity(), |acc, offset| {
                let mut res = *acc;
                *acc = instruction.apply(*acc, data[*offset]);
                if self.inclusive {
                    res = *acc;
                }

                Some(res)
            });

            for (offset, value) in offsets.iter().zip(scanned) {
                output[*offset] = value;
            }
        }

        output
    }
}
