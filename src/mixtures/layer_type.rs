//! Aggregation layers of a mixture
//!
//! Layers are ordered top-to-bottom by density: the gas phase floats above
//! the liquid sub-phases, solids sink to the bottom. The bit-flag values
//! match the listing order so that ordinal comparisons follow depth.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LayerType {
    None = 0,
    Gaseous = 1 << 0,
    InorgLiquefiedGas = 1 << 1,
    Nonpolar = 1 << 2,
    Polar = 1 << 3,
    DenseNonpolar = 1 << 4,
    InorgMoltenSolid = 1 << 5,
    Solid = 1 << 6,
}

impl LayerType {
    /// All real layers, top to bottom
    pub fn all() -> impl Iterator<Item = LayerType> {
        [
            LayerType::Gaseous,
            LayerType::InorgLiquefiedGas,
            LayerType::Nonpolar,
            LayerType::Polar,
            LayerType::DenseNonpolar,
            LayerType::InorgMoltenSolid,
            LayerType::Solid,
        ]
        .into_iter()
    }

    /// Zero-based depth index of a real layer (gaseous = 0)
    pub fn index(self) -> Option<usize> {
        if self.is_real_layer() {
            Some((self as u8).trailing_zeros() as usize)
        } else {
            None
        }
    }

    fn from_index(index: usize) -> Option<LayerType> {
        LayerType::all().nth(index)
    }

    pub fn is_real_layer(self) -> bool {
        self != LayerType::None
    }

    pub fn is_gas_layer(self) -> bool {
        self == LayerType::Gaseous
    }

    pub fn is_liquid_layer(self) -> bool {
        matches!(
            self,
            LayerType::InorgLiquefiedGas
                | LayerType::Nonpolar
                | LayerType::Polar
                | LayerType::DenseNonpolar
                | LayerType::InorgMoltenSolid
        )
    }

    pub fn is_solid_layer(self) -> bool {
        self == LayerType::Solid
    }

    /// The layer immediately above (less dense), if any
    pub fn above(self) -> Option<LayerType> {
        let index = self.index()?;
        if index == 0 { None } else { Self::from_index(index - 1) }
    }

    /// The layer immediately below (denser), if any
    pub fn below(self) -> Option<LayerType> {
        Self::from_index(self.index()? + 1)
    }

    /// Ordinal distance between two real layers
    pub fn distance(self, other: LayerType) -> Option<usize> {
        Some(self.index()?.abs_diff(other.index()?))
    }

    pub fn is_adjacent_to(self, other: LayerType) -> bool {
        self.distance(other) == Some(1)
    }

    /// The canonical layer matter converts into when gaining aggregation
    /// energy: solids melt into the polar liquid, liquids boil into the gas.
    pub fn higher_aggregation_layer(self) -> LayerType {
        if self.is_solid_layer() {
            LayerType::Polar
        } else if self.is_liquid_layer() {
            LayerType::Gaseous
        } else {
            LayerType::None
        }
    }

    /// The canonical layer matter converts into when losing aggregation
    /// energy: gases condense into the polar liquid, liquids freeze solid.
    pub fn lower_aggregation_layer(self) -> LayerType {
        if self.is_gas_layer() {
            LayerType::Polar
        } else if self.is_liquid_layer() {
            LayerType::Solid
        } else {
            LayerType::None
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerType::None => "none",
            LayerType::Gaseous => "gaseous",
            LayerType::InorgLiquefiedGas => "liquefied gas",
            LayerType::Nonpolar => "nonpolar",
            LayerType::Polar => "polar",
            LayerType::DenseNonpolar => "dense nonpolar",
            LayerType::InorgMoltenSolid => "molten solid",
            LayerType::Solid => "solid",
        };
        write!(f, "{name}")
    }
}
