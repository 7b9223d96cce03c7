use pflow_canonical::{CidConfig, CidDeriver};
use serde_json::json;

fn main() {
    let deriver = CidDeriver::new(CidConfig::default());
    let value = json!({
        "@type": "PetriNet",
        "places": {
            "p0": { "offset": 0, "initial": [1] }
        },
        "transitions": {
            "t0": { "x": 10, "y": 20 }
        },
        "arcs": [
            { "source": "p0", "target": "t0" }
        ]
    });

    match deriver.canonicalizer().canonicalize(&value) {
        Ok(bytes) => {
            println!("{}", String::from_utf8_lossy(&bytes));
            println!("{}", deriver.identify(&bytes));
        }
        Err(err) => {
            eprintln!("canonicalization failed: {}", err);
            std::process::exit(1);
        }
    }
}
