//! CRD YAML Generator
//!
//! Prints the CRDs of every curated Atlas kind the exporter produces.
//!
//! Usage: cargo run --bin crdgen > deploy/crds/curated.yaml

use atlas_k8s_exporter::crd::generate_crds;

fn main() -> anyhow::Result<()> {
    for crd in generate_crds()? {
        println!("---");
        print!("{}", crd);
    }
    Ok(())
}
