//! Molecular structure graphs
//!
//! A `MolecularStructure` is an undirected graph of non-implied atoms with
//! bond orders and a per-atom implied-hydrogen count. Structures support a
//! compact SMILES subset (chains, branches, `=`/`#` bonds, bracket atoms,
//! single-digit ring closures), sub-structure matching with radical
//! wildcards, and branch grafting used by the concrete-product generator.

use crate::error::{SimulationError, SimulationResult};
use crate::molecules::atoms::AtomTable;
use crate::quantities::{GramPerMole, Quantity};
use std::collections::{BTreeMap, BTreeSet};

/// A non-implied atom: an element symbol or a radical wildcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub symbol: String,
    pub is_radical: bool,
}

/// A bond to another atom with an order of 1, 2 or 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub to: usize,
    pub order: u8,
}

#[derive(Debug, Clone, Default)]
pub struct MolecularStructure {
    atoms: Vec<Atom>,
    bonds: Vec<Vec<Bond>>,
    implied_hydrogens: Vec<u8>,
    molar_mass: Quantity<GramPerMole>,
}

impl MolecularStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a structure from the supported SMILES subset.
    pub fn from_smiles(smiles: &str, table: &AtomTable) -> SimulationResult<Self> {
        let mut structure = Self::new();
        let mut chars = smiles.chars().peekable();
        let mut prev: Option<usize> = None;
        let mut branch_stack: Vec<Option<usize>> = Vec::new();
        let mut ring_bonds: BTreeMap<char, (usize, u8)> = BTreeMap::new();
        let mut pending_order: u8 = 1;

        let parse_err = |message: &str| SimulationError::StructureParse {
            input: smiles.to_string(),
            message: message.to_string(),
        };

        while let Some(&c) = chars.peek() {
            match c {
                '=' => {
                    chars.next();
                    pending_order = 2;
                }
                '#' => {
                    chars.next();
                    pending_order = 3;
                }
                '(' => {
                    chars.next();
                    branch_stack.push(prev);
                }
                ')' => {
                    chars.next();
                    prev = branch_stack
                        .pop()
                        .ok_or_else(|| parse_err("unbalanced ')'"))?;
                }
                '[' => {
                    chars.next();
                    let mut symbol = String::new();
                    for inner in chars.by_ref() {
                        if inner == ']' {
                            break;
                        }
                        symbol.push(inner);
                    }
                    if symbol.is_empty() {
                        return Err(parse_err("empty bracket atom"));
                    }
                    let is_radical = symbol == "R" || symbol == "*";
                    if !is_radical && !table.contains(&symbol) {
                        return Err(SimulationError::UnknownAtom(symbol));
                    }
                    let idx = structure.add_atom(&symbol, is_radical);
                    if let Some(p) = prev {
                        structure.add_bond(p, idx, pending_order);
                    }
                    pending_order = 1;
                    prev = Some(idx);
                }
                '*' => {
                    chars.next();
                    let idx = structure.add_atom("*", true);
                    if let Some(p) = prev {
                        structure.add_bond(p, idx, pending_order);
                    }
                    pending_order = 1;
                    prev = Some(idx);
                }
                '0'..='9' => {
                    chars.next();
                    let current = prev.ok_or_else(|| parse_err("ring closure before atom"))?;
                    if let Some((other, order)) = ring_bonds.remove(&c) {
                        structure.add_bond(current, other, order.max(pending_order));
                    } else {
                        ring_bonds.insert(c, (current, pending_order));
                    }
                    pending_order = 1;
                }
                'A'..='Z' => {
                    chars.next();
                    let mut symbol = c.to_string();
                    if let Some(&low) = chars.peek()
                        && low.is_ascii_lowercase()
                    {
                        let two = format!("{symbol}{low}");
                        if table.contains(&two) {
                            symbol = two;
                            chars.next();
                        }
                    }
                    if !table.contains(&symbol) {
                        return Err(SimulationError::UnknownAtom(symbol));
                    }
                    let idx = structure.add_atom(&symbol, false);
                    if let Some(p) = prev {
                        structure.add_bond(p, idx, pending_order);
                    }
                    pending_order = 1;
                    prev = Some(idx);
                }
                _ => return Err(parse_err(&format!("unsupported character '{c}'"))),
            }
        }

        if !ring_bonds.is_empty() {
            return Err(parse_err("unclosed ring bond"));
        }
        if !branch_stack.is_empty() {
            return Err(parse_err("unbalanced '('"));
        }
        if structure.atoms.is_empty() {
            return Err(parse_err("no atoms"));
        }

        structure.recount_implied_hydrogens(table)?;
        Ok(structure)
    }

    pub fn add_atom(&mut self, symbol: &str, is_radical: bool) -> usize {
        self.atoms.push(Atom {
            symbol: symbol.to_string(),
            is_radical,
        });
        self.bonds.push(Vec::new());
        self.implied_hydrogens.push(0);
        self.atoms.len() - 1
    }

    pub fn add_bond(&mut self, a: usize, b: usize, order: u8) {
        self.bonds[a].push(Bond { to: b, order });
        self.bonds[b].push(Bond { to: a, order });
    }

    /// Recompute implied hydrogens from valences and refresh the molar mass.
    pub fn recount_implied_hydrogens(&mut self, table: &AtomTable) -> SimulationResult<()> {
        let mut mass = 0.0;
        let hydrogen = table.weight_of("H")?.value();
        for i in 0..self.atoms.len() {
            if self.atoms[i].is_radical {
                self.implied_hydrogens[i] = 0;
                continue;
            }
            let bond_sum: u8 = self.bonds[i].iter().map(|b| b.order).sum();
            let valence = table.fitting_valence(&self.atoms[i].symbol, bond_sum)?;
            self.implied_hydrogens[i] = valence.saturating_sub(bond_sum);
            mass += table.get(&self.atoms[i].symbol)?.weight
                + self.implied_hydrogens[i] as f64 * hydrogen;
        }
        self.molar_mass = Quantity::new(mass);
        Ok(())
    }

    pub fn atom(&self, idx: usize) -> &Atom {
        &self.atoms[idx]
    }

    pub fn bonds_of(&self, idx: usize) -> &[Bond] {
        &self.bonds[idx]
    }

    pub fn implied_hydrogens_of(&self, idx: usize) -> u8 {
        self.implied_hydrogens[idx]
    }

    /// Number of non-implied atoms
    pub fn non_implied_atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn molar_mass(&self) -> Quantity<GramPerMole> {
        self.molar_mass
    }

    /// A lone explicit hydrogen, standing in for an implied one
    pub fn is_virtual_hydrogen(&self) -> bool {
        self.atoms.len() == 1 && !self.atoms[0].is_radical && self.atoms[0].symbol == "H"
    }

    pub fn has_radicals(&self) -> bool {
        self.atoms.iter().any(|a| a.is_radical)
    }

    /// Indices of radical atoms in ascending order
    pub fn radical_atoms(&self) -> Vec<usize> {
        (0..self.atoms.len())
            .filter(|&i| self.atoms[i].is_radical)
            .collect()
    }

    /// Rotational + translational degrees of freedom, estimated from the
    /// total atom count (implied hydrogens included).
    pub fn degrees_of_freedom(&self) -> u8 {
        let total =
            self.atoms.len() + self.implied_hydrogens.iter().map(|&h| h as usize).sum::<usize>();
        match total {
            1 => 3,
            2 => 5,
            _ => 6,
        }
    }

    fn atoms_compatible(&self, target_idx: usize, pattern: &Self, pattern_idx: usize) -> bool {
        let p = &pattern.atoms[pattern_idx];
        if p.is_radical {
            return true;
        }
        let t = &self.atoms[target_idx];
        if t.is_radical || t.symbol != p.symbol {
            return false;
        }
        // non-radical pattern atoms must match their full neighbourhood
        self.implied_hydrogens[target_idx] == pattern.implied_hydrogens[pattern_idx]
            && self.bonds[target_idx].len() == pattern.bonds[pattern_idx].len()
    }

    /// Match `pattern` against this structure. Radical pattern atoms match
    /// any atom; non-radical pattern atoms must agree on symbol, bond count
    /// and implied hydrogens. Returns a map from pattern atom indices to
    /// atom indices of `self`, or `None` when no match exists.
    pub fn match_with(&self, pattern: &Self) -> Option<BTreeMap<usize, usize>> {
        if pattern.atoms.is_empty() || pattern.atoms.len() > self.atoms.len() {
            return None;
        }

        // anchor on the first non-radical pattern atom when one exists
        let anchor = (0..pattern.atoms.len())
            .find(|&i| !pattern.atoms[i].is_radical)
            .unwrap_or(0);

        for start in 0..self.atoms.len() {
            if !self.atoms_compatible(start, pattern, anchor) {
                continue;
            }
            let mut mapping = BTreeMap::new();
            let mut used = vec![false; self.atoms.len()];
            mapping.insert(anchor, start);
            used[start] = true;
            if self.extend_match(pattern, &mut mapping, &mut used) {
                return Some(mapping);
            }
        }
        None
    }

    fn extend_match(
        &self,
        pattern: &Self,
        mapping: &mut BTreeMap<usize, usize>,
        used: &mut Vec<bool>,
    ) -> bool {
        // pick an unmapped pattern atom adjacent to the mapped frontier
        let next = mapping.keys().find_map(|&p| {
            pattern.bonds[p]
                .iter()
                .find(|b| !mapping.contains_key(&b.to))
                .map(|b| (p, b.to, b.order))
        });

        let Some((from_p, next_p, order)) = next else {
            // frontier exhausted: every pattern atom is mapped iff connected
            return mapping.len() == pattern.atoms.len();
        };

        let from_t = mapping[&from_p];
        for bond in &self.bonds[from_t] {
            if bond.order != order || used[bond.to] {
                continue;
            }
            if !self.atoms_compatible(bond.to, pattern, next_p) {
                continue;
            }
            // all already-mapped neighbours of next_p must be bonded alike
            let consistent = pattern.bonds[next_p].iter().all(|pb| {
                mapping.get(&pb.to).is_none_or(|&t| {
                    self.bonds[bond.to]
                        .iter()
                        .any(|tb| tb.to == t && tb.order == pb.order)
                })
            });
            if !consistent {
                continue;
            }

            mapping.insert(next_p, bond.to);
            used[bond.to] = true;
            if self.extend_match(pattern, mapping, used) {
                return true;
            }
            mapping.remove(&next_p);
            used[bond.to] = false;
        }
        false
    }

    /// Whether `pattern` matches somewhere in this structure.
    pub fn matches_with(&self, pattern: &Self) -> bool {
        self.match_with(pattern).is_some()
    }

    /// Replace the radical atom `target_idx` with atom `source_root` of
    /// `source` and graft every source branch reachable from it without
    /// passing through `excluded` atoms (the already-matched core).
    pub fn graft_branch(
        &mut self,
        target_idx: usize,
        source: &Self,
        source_root: usize,
        excluded: &BTreeSet<usize>,
    ) {
        self.atoms[target_idx] = Atom {
            symbol: source.atoms[source_root].symbol.clone(),
            is_radical: source.atoms[source_root].is_radical,
        };

        let mut copied: BTreeMap<usize, usize> = BTreeMap::new();
        copied.insert(source_root, target_idx);
        let mut queue = vec![source_root];

        while let Some(src) = queue.pop() {
            for bond in &source.bonds[src] {
                if excluded.contains(&bond.to) {
                    continue;
                }
                let dst_from = copied[&src];
                if let Some(&existing) = copied.get(&bond.to) {
                    let already = self.bonds[dst_from].iter().any(|b| b.to == existing);
                    if !already {
                        self.add_bond(dst_from, existing, bond.order);
                    }
                    continue;
                }
                let atom = &source.atoms[bond.to];
                let new_idx = self.add_atom(&atom.symbol, atom.is_radical);
                self.add_bond(dst_from, new_idx, bond.order);
                copied.insert(bond.to, new_idx);
                queue.push(bond.to);
            }
        }
    }

    /// Stable structural fingerprint: iteratively refined atom codes folded
    /// through CRC-64. Equal structures always agree; distinct structures
    /// collide only with fingerprint probability.
    pub fn fingerprint(&self) -> u64 {
        fn mix(a: u64, b: u64) -> u64 {
            (a ^ b).wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(31)
        }

        let mut codes: Vec<u64> = (0..self.atoms.len())
            .map(|i| {
                let mut code = 0xcbf2_9ce4_8422_2325u64;
                for byte in self.atoms[i].symbol.bytes() {
                    code = mix(code, byte as u64);
                }
                code = mix(code, self.atoms[i].is_radical as u64);
                code = mix(code, self.implied_hydrogens[i] as u64);
                mix(code, self.bonds[i].len() as u64)
            })
            .collect();

        for _ in 0..self.atoms.len().min(8) {
            let mut next = codes.clone();
            for i in 0..self.atoms.len() {
                let mut neighbour_codes: Vec<u64> = self.bonds[i]
                    .iter()
                    .map(|b| mix(codes[b.to], b.order as u64))
                    .collect();
                neighbour_codes.sort_unstable();
                for n in neighbour_codes {
                    next[i] = mix(next[i], n);
                }
            }
            codes = next;
        }
        codes.sort_unstable();

        let crc = crc::Crc::<u64>::new(&crc::CRC_64_ECMA_182);
        let mut digest = crc.digest();
        digest.update(&(self.atoms.len() as u64).to_le_bytes());
        for code in codes {
            digest.update(&code.to_le_bytes());
        }
        digest.finalize()
    }
}

impl PartialEq for MolecularStructure {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}
