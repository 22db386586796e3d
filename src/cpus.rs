// src/cpus.rs

//! Host processor detection.
//!
//! The parallel build level defaults to the number of *physical* cores, not
//! logical processors, so hyperthreads don't inflate the default. Detection
//! parses `/proc/cpuinfo`: when the file consistently reports one
//! `physical id` and one `cpu cores` line per `processor` entry, the
//! per-package core counts are summed; otherwise the logical processor
//! count is used. A host where neither works counts as a single processor.

use std::collections::BTreeMap;
use std::fs;
use std::sync::OnceLock;

use tracing::warn;

const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Memoized processor count for one [`Session`](crate::session::Session).
///
/// Detection runs once on first use and is never repeated, even if the host
/// topology changes underneath us.
#[derive(Debug, Default)]
pub struct ProcessorCount {
    cached: OnceLock<usize>,
}

impl ProcessorCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// The detected processor count, always at least 1.
    pub fn get(&self) -> usize {
        *self.cached.get_or_init(detect)
    }
}

fn detect() -> usize {
    match fs::read_to_string(CPUINFO_PATH) {
        Ok(text) => count_from_cpuinfo(&text),
        Err(err) => {
            warn!(error = %err, path = CPUINFO_PATH, "cannot read cpu topology, assuming a single processor");
            1
        }
    }
}

/// Count processors from `/proc/cpuinfo`-formatted text.
///
/// Three sequences are collected in file order: `processor` entries,
/// `physical id` values and `cpu cores` values. Only when all three agree
/// in length is the physical-core sum trusted; duplicate physical ids keep
/// the last reported core count.
pub(crate) fn count_from_cpuinfo(text: &str) -> usize {
    let mut logical = 0usize;
    let mut physical_ids: Vec<u32> = Vec::new();
    let mut core_counts: Vec<u32> = Vec::new();

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "processor" => {
                if value.parse::<u32>().is_ok() {
                    logical += 1;
                }
            }
            "physical id" => {
                if let Ok(id) = value.parse() {
                    physical_ids.push(id);
                }
            }
            "cpu cores" => {
                if let Ok(cores) = value.parse() {
                    core_counts.push(cores);
                }
            }
            _ => {}
        }
    }

    if logical > 0 && physical_ids.len() == logical && core_counts.len() == logical {
        let mut per_package: BTreeMap<u32, u32> = BTreeMap::new();
        for (id, cores) in physical_ids.iter().zip(core_counts.iter()) {
            per_package.insert(*id, *cores);
        }
        let physical: u32 = per_package.values().sum();
        (physical as usize).max(1)
    } else if logical > 0 {
        logical
    } else {
        warn!("no processor entries in cpu topology data, assuming a single processor");
        1
    }
}

#[cfg(test)]
mod tests {
    use super::count_from_cpuinfo;

    fn block(processor: u32, physical_id: u32, cores: u32) -> String {
        format!(
            "processor\t: {processor}\n\
             vendor_id\t: GenuineIntel\n\
             physical id\t: {physical_id}\n\
             cpu cores\t: {cores}\n\n"
        )
    }

    #[test]
    fn sums_physical_cores_when_all_counts_agree() {
        // 2 packages x 4 cores, 8 logical processors: hyperthreading off.
        let mut text = String::new();
        for processor in 0..8 {
            text.push_str(&block(processor, processor / 4, 4));
        }
        assert_eq!(count_from_cpuinfo(&text), 8);
    }

    #[test]
    fn sums_physical_cores_ignoring_hyperthreads() {
        // 1 package x 4 cores, 8 logical processors: each core seen twice.
        let mut text = String::new();
        for processor in 0..8 {
            text.push_str(&block(processor, 0, 4));
        }
        assert_eq!(count_from_cpuinfo(&text), 4);
    }

    #[test]
    fn duplicate_physical_id_keeps_last_core_count() {
        let text = format!("{}{}", block(0, 0, 4), block(1, 0, 2));
        assert_eq!(count_from_cpuinfo(&text), 2);
    }

    #[test]
    fn falls_back_to_logical_count_on_partial_topology() {
        // `physical id` lines missing: sequences disagree in length.
        let mut text = String::new();
        for processor in 0..6 {
            text.push_str(&format!("processor\t: {processor}\ncpu cores\t: 4\n\n"));
        }
        assert_eq!(count_from_cpuinfo(&text), 6);
    }

    #[test]
    fn falls_back_to_one_on_unparseable_input() {
        assert_eq!(count_from_cpuinfo(""), 1);
        assert_eq!(count_from_cpuinfo("model name : mystery\n"), 1);
    }
}
