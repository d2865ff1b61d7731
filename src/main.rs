//! mf - command-line inspector for manifold dimension configurations.
//!
//! All logic lives in the library; this binary only hands control to
//! [`manifold::cli::run`].

fn main() -> anyhow::Result<()> {
    manifold::cli::run()
}
