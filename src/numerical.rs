/// Newton-Raphson solver for one equation in one unknown, with a full
/// per-iteration trace.
pub mod NR;
/// multi-start scan of an interval for all reachable roots
pub mod multi_root;
/// calculator settings and their defaults
pub mod settings;
