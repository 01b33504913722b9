use gridscan_core::{ConfigurationError, Coordinate, Shape};

static COMPONENTS: [char; 4] = ['x', 'y', 'z', 'w'];

/// The ranks a scan kernel can be generated for.
///
/// Each rank indexes exactly one axis, always the innermost one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    R1,
    R2,
    R3,
    R4,
}

impl Rank {
    /// The rank of a `rank`-dimensional tensor.
    pub fn new(rank: usize) -> Result<Self, ConfigurationError> {
        match rank {
            1 => Ok(Rank::R1),
            2 => Ok(Rank::R2),
            3 => Ok(Rank::R3),
            4 => Ok(Rank::R4),
            _ => Err(ConfigurationError::UnsupportedRank { rank }),
        }
    }

    /// The number of dimensions.
    pub fn value(self) -> usize {
        match self {
            Rank::R1 => 1,
            Rank::R2 => 2,
            Rank::R3 => 3,
            Rank::R4 => 4,
        }
    }

    /// The axis indexed for this rank.
    pub fn scan_axis(self) -> usize {
        self.value() - 1
    }

    /// The vector component holding the scanned axis, `None` when coordinates are scalars.
    pub fn scan_component(self) -> Option<char> {
        match self {
            Rank::R1 => None,
            Rank::R2 => Some('y'),
            Rank::R3 => Some('z'),
            Rank::R4 => Some('w'),
        }
    }

    /// The type of a coordinate in the emitted source.
    pub fn coords_type(self) -> &'static str {
        match self {
            Rank::R1 => "i32",
            Rank::R2 => "vec2<i32>",
            Rank::R3 => "vec3<i32>",
            Rank::R4 => "vec4<i32>",
        }
    }

    fn components(self) -> &'static [char] {
        &COMPONENTS[..self.value()]
    }
}

/// Index arithmetic of a scan axis, both as source expressions and on host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisIndexer {
    rank: Rank,
    axis: usize,
}

impl AxisIndexer {
    /// Create the indexer of `axis` for `rank`-dimensional tensors.
    pub fn new(rank: usize, axis: usize) -> Result<Self, ConfigurationError> {
        let rank = Rank::new(rank)?;
        if axis >= rank.value() {
            return Err(ConfigurationError::AxisOutOfBounds {
                axis,
                rank: rank.value(),
            });
        }
        if axis != rank.scan_axis() {
            return Err(ConfigurationError::AxisConvention {
                axis,
                rank: rank.value(),
                expected: rank.scan_axis(),
            });
        }

        Ok(Self { rank, axis })
    }

    /// Create the indexer of `axis` for tensors of the given shape.
    pub fn for_shape(shape: &Shape, axis: usize) -> Result<Self, ConfigurationError> {
        Self::new(shape.rank(), axis)
    }

    /// The rank of the indexed tensors.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The indexed axis.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The source expression of the axis component of the coordinate `name`.
    pub fn axis_component(&self, name: &str) -> String {
        match self.rank.scan_component() {
            Some(component) => format!("{name}.{component}"),
            None => name.to_string(),
        }
    }

    /// The coordinate `name` expanded into the argument list of a read.
    pub fn coords(&self, name: &str) -> String {
        coords_expansion(self.rank, name, None)
    }

    /// The type of a coordinate in the emitted source.
    pub fn coords_type(&self) -> &'static str {
        self.rank.coords_type()
    }

    /// The axis component of a coordinate.
    pub fn get(&self, coordinate: &Coordinate) -> usize {
        coordinate[self.axis]
    }

    /// The coordinate with its axis component set to `value`.
    pub fn with(&self, coordinate: &Coordinate, value: usize) -> Coordinate {
        coordinate.with(self.axis, value)
    }
}

/// Expands a coordinate into the argument list of a read, optionally swapping two components.
pub(crate) fn coords_expansion(rank: Rank, name: &str, swap: Option<(usize, usize)>) -> String {
    if rank == Rank::R1 {
        return name.to_string();
    }

    let mut components = rank.components().to_vec();
    if let Some((a, b)) = swap {
        components.swap(a, b);
    }

    components
        .iter()
        .map(|component| format!("{name}.{component}"))
        .collect::<Vec<_>>()
        .join(", ")
}
