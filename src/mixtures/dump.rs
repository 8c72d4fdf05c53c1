//! The dump container: a bottomless sink
//!
//! Tracks only the total mass and energy it has swallowed. The counters
//! saturate: on arithmetic overflow the counter that overflowed resets to
//! zero with a warning.

use crate::mixtures::container::Container;
use crate::mixtures::reactant::Reactant;
use crate::quantities::{Gram, Joule, Quantity};
use crate::types::{Shared, shared};
use tracing::warn;

thread_local! {
    static GLOBAL_DUMP: Shared<DumpContainer> = shared(DumpContainer::new());
}

#[derive(Debug, Clone, Default)]
pub struct DumpContainer {
    total_mass: Quantity<Gram>,
    total_energy: Quantity<Joule>,
}

impl DumpContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide shared dump
    pub fn global() -> Shared<DumpContainer> {
        GLOBAL_DUMP.with(|dump| dump.clone())
    }

    /// Zero the global dump counters (for tests)
    pub fn reset_global() {
        GLOBAL_DUMP.with(|dump| *dump.borrow_mut() = DumpContainer::new());
    }

    pub fn total_energy(&self) -> Quantity<Joule> {
        self.total_energy
    }
}

impl Container for DumpContainer {
    fn add_reactant(&mut self, reactant: Reactant) {
        let mass = reactant.mass();
        if self.total_mass.overflows_on_add(mass) {
            warn!("DumpContainer: mass overflowed and was reset to 0.");
            self.total_mass = Quantity::ZERO;
            return;
        }
        self.total_mass += mass;
    }

    fn add_energy(&mut self, energy: Quantity<Joule>) {
        if self.total_energy.overflows_on_add(energy) {
            warn!("DumpContainer: energy overflowed and was reset to 0.");
            self.total_energy = Quantity::ZERO;
            return;
        }
        self.total_energy += energy;
    }

    fn total_mass(&self) -> Quantity<Gram> {
        self.total_mass
    }
}
