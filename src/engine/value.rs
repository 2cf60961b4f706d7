/// Core value representation.
///
/// Defines the `Value` type carried through every evaluation: arbitrary
/// precision numerics, text, lists, the null value, and host-supplied
/// variants. Also defines the total order used by the comparison operators
/// and the canonical text form used by the logging hooks.
pub mod core;
/// Host value extension seam.
///
/// Defines the `HostValue` trait through which embedding applications plug
/// domain-specific value variants into the engine without the engine knowing
/// their concrete types.
pub mod host;
