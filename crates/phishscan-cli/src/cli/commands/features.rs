//! `phishscan features` – list feature names in model order.

use phishscan_core::Feature;

pub fn run_features() {
    for (i, f) in Feature::ALL.iter().enumerate() {
        println!("{:>2}  {:<28} fallback {:>2}", i + 1, f.name(), f.fallback().value());
    }
}
