//! Per-unit translation drivers for both directions of the bridge.
//!
//! The diagram side: a [`DiagramSession`] ingests the host's event stream
//! ([`DiagramEvent`]), builds the unit's wiring graph and interface
//! ([`InterfaceBuilder`]), and classifies every formula node
//! ([`classify`]) once connectivity is complete. The text side: a
//! [`FileTranslator`] walks parsed design files, registers entity
//! interfaces, and produces one [`UnitArtifact`] per architecture with the
//! reconciled connectivity to materialize.

#![warn(missing_docs)]

pub mod classify;
pub mod errors;
pub mod events;
pub mod iface_builder;
pub mod session;
pub mod unit;

pub use classify::{classify, Classified, ClassifyError, FormulaUnit};
pub use events::{classify_wire_label, ControlStyle, DiagramEvent, LabelError, WireLabel};
pub use iface_builder::{BuildError, InterfaceBuilder};
pub use session::{DiagramSession, SessionError, SessionOutcome};
pub use unit::{FileTranslator, TranslateError, UnitArtifact};
