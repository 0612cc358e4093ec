use std::fmt;
use std::str::FromStr;

use crate::error::ShapeError;

/// Where along an axis a crop or pad is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Where {
    /// Keep the start of the axis: crop removes from, pad adds to, the low side.
    Start,
    /// Keep the end of the axis: crop removes from, pad adds to, the high side.
    End,
    /// Split evenly, the odd element goes to the high side.
    #[default]
    Center,
    /// Crop only. The low offset is drawn uniformly from `0..=reduction`.
    Random,
}

impl Where {
    pub fn as_str(&self) -> &'static str {
        match self {
            Where::Start => "start",
            Where::End => "end",
            Where::Center => "center",
            Where::Random => "random",
        }
    }
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Where {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Where::Start),
            "end" => Ok(Where::End),
            "center" => Ok(Where::Center),
            "random" => Ok(Where::Random),
            other => Err(ShapeError::InvalidPlacement(other.to_owned())),
        }
    }
}

/// How padded elements are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadMode {
    /// Fill with the configured value, zero if none is set.
    #[default]
    Constant,
    /// Fill with zero regardless of the configured value.
    Zeros,
    /// Fill with the global minimum of the input.
    Min,
    /// Fill with the global maximum of the input.
    Max,
    /// Fill with the global mean of the input.
    Mean,
    /// Repeat the boundary element.
    Edge,
    /// Mirror around the boundary element without repeating it.
    Reflect,
    /// Mirror around the boundary, repeating the boundary element.
    Symmetric,
    /// Continue the axis periodically.
    Wrap,
}

impl PadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PadMode::Constant => "constant",
            PadMode::Zeros => "zeros",
            PadMode::Min => "min",
            PadMode::Max => "max",
            PadMode::Mean => "mean",
            PadMode::Edge => "edge",
            PadMode::Reflect => "reflect",
            PadMode::Symmetric => "symmetric",
            PadMode::Wrap => "wrap",
        }
    }

    /// Whether padded elements are copied from the input rather than set to one value.
    pub fn is_indexed(&self) -> bool {
        matches!(
            self,
            PadMode::Edge | PadMode::Reflect | PadMode::Symmetric | PadMode::Wrap
        )
    }
}

impl fmt::Display for PadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PadMode {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(PadMode::Constant),
            "zeros" => Ok(PadMode::Zeros),
            "min" => Ok(PadMode::Min),
            "max" => Ok(PadMode::Max),
            "mean" => Ok(PadMode::Mean),
            "edge" | "replicate" => Ok(PadMode::Edge),
            "reflect" => Ok(PadMode::Reflect),
            "symmetric" => Ok(PadMode::Symmetric),
            "wrap" | "circular" => Ok(PadMode::Wrap),
            other => Err(ShapeError::InvalidMode(other.to_owned())),
        }
    }
}
