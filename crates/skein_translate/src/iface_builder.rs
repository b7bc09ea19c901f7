//! Builds an interface declaration from front-panel control events.
//!
//! Each control's label holds one interface-element declaration; the
//! control style tells generics (integer controls) and ports (float
//! controls) apart. Clustered panels pack several elements behind one
//! connector-pane slot and carry each element's real connector index as a
//! number in the control's free-text description.

use std::collections::{BTreeMap, HashMap};

use skein_ast::fragment;
use skein_common::{Interner, Uid};
use skein_bind::{IfaceError, InterfaceDecl, InterfaceName};

use crate::events::ControlStyle;

/// Errors raised while assembling an interface from control events.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// No root panel event preceded the first control.
    #[error("no root panel observed")]
    MissingPanel,
    /// A control without a label; the label holds the declaration.
    #[error("missing label of control {uid} (should contain a declaration)")]
    MissingLabel {
        /// The offending control.
        uid: Uid,
    },
    /// A control label that does not parse as the declaration kind its
    /// style demands.
    #[error("label of control {uid} is not a valid declaration: `{text}`")]
    BadDeclaration {
        /// The offending control.
        uid: Uid,
        /// The label text.
        text: String,
    },
    /// A control style that maps to neither generics nor ports.
    #[error("control style of {uid} not recognized: {style}")]
    UnrecognizedStyle {
        /// The offending control.
        uid: Uid,
        /// The style name.
        style: String,
    },
    /// A clustered panel with a control owned directly by the front panel.
    #[error("panel is clustered, but control {uid} is owned by the front panel")]
    ClusteredPanelOwner {
        /// The offending control.
        uid: Uid,
    },
    /// An unclustered panel with a control owned by something else.
    #[error("panel is not clustered, but control {uid} is not owned by the front panel")]
    UnclusteredNonPanelOwner {
        /// The offending control.
        uid: Uid,
    },
    /// A clustered control whose owner is not a known cluster.
    #[error("control {uid} is owned by unknown cluster {owner}")]
    UnknownCluster {
        /// The offending control.
        uid: Uid,
        /// The claimed owner.
        owner: Uid,
    },
    /// A clustered control whose description does not hold its virtual
    /// connector index.
    #[error("control description `{text}` does not contain a port or generic index")]
    BadVirtualIndex {
        /// The offending control.
        uid: Uid,
        /// The description text.
        text: String,
    },
    /// Interface assembly failed (duplicate or non-dense indices,
    /// multiple identifiers in one slot).
    #[error(transparent)]
    Iface(#[from] IfaceError),
}

/// Accumulates panel, cluster, and control events into an
/// [`InterfaceDecl`].
#[derive(Default)]
pub struct InterfaceBuilder {
    root_panel: Option<Uid>,
    clustered: bool,
    generics: Vec<(u32, skein_ast::InterfaceElement)>,
    ports: Vec<(u32, skein_ast::InterfaceElement)>,
    member_index: HashMap<Uid, usize>,
    cluster_index: HashMap<Uid, u32>,
    cluster_names: HashMap<u32, BTreeMap<usize, String>>,
}

impl InterfaceBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a panel; the ownerless one is the root front panel.
    pub fn observe_panel(&mut self, owner: Option<Uid>, uid: Uid) {
        if owner.is_none() {
            self.root_panel = Some(uid);
        }
    }

    /// Records a cluster and its member order. Connector slot `index`
    /// belongs to the whole cluster; members later place themselves by the
    /// virtual index in their description.
    pub fn observe_cluster(&mut self, uid: Uid, index: u32, members: &[Uid]) {
        self.clustered = true;
        self.cluster_index.insert(uid, index);
        self.cluster_names.insert(index, BTreeMap::new());
        for (position, &member) in members.iter().enumerate() {
            self.member_index.insert(member, position);
        }
    }

    /// Records one control. Ownership must agree with the clustering mode
    /// both ways.
    pub fn observe_control(
        &mut self,
        owner: Uid,
        uid: Uid,
        label: Option<&str>,
        style: &ControlStyle,
        connector_index: u32,
        description: &str,
        interner: &Interner,
    ) -> Result<(), BuildError> {
        let root = self.root_panel.ok_or(BuildError::MissingPanel)?;
        let label = label.ok_or(BuildError::MissingLabel { uid })?;

        let connector_index = if self.clustered {
            if owner == root {
                return Err(BuildError::ClusteredPanelOwner { uid });
            }
            let cluster = *self
                .cluster_index
                .get(&owner)
                .ok_or(BuildError::UnknownCluster { uid, owner })?;
            if let (Some(&position), Some(names)) = (
                self.member_index.get(&uid),
                self.cluster_names.get_mut(&cluster),
            ) {
                names.insert(position, label.to_owned());
            }
            // The element's real pane position lives in the description.
            description
                .trim()
                .parse::<u32>()
                .map_err(|_| BuildError::BadVirtualIndex {
                    uid,
                    text: description.to_owned(),
                })?
        } else {
            if owner != root {
                return Err(BuildError::UnclusteredNonPanelOwner { uid });
            }
            connector_index
        };

        match style {
            ControlStyle::NumericI32 => {
                let element = fragment::try_interface_constant(label, interner).ok_or_else(
                    || BuildError::BadDeclaration {
                        uid,
                        text: label.to_owned(),
                    },
                )?;
                self.generics.push((connector_index, element));
            }
            ControlStyle::NumericDbl => {
                let element = fragment::try_interface_signal(label, interner).ok_or_else(
                    || BuildError::BadDeclaration {
                        uid,
                        text: label.to_owned(),
                    },
                )?;
                self.ports.push((connector_index, element));
            }
            ControlStyle::Other(style) => {
                return Err(BuildError::UnrecognizedStyle {
                    uid,
                    style: style.clone(),
                })
            }
        }
        Ok(())
    }

    /// `true` once a cluster event has been observed.
    pub fn is_clustered(&self) -> bool {
        self.clustered
    }

    /// Member labels of the cluster occupying connector slot `index`, in
    /// cluster order.
    pub fn clustered_names(&self, index: u32) -> Option<&BTreeMap<usize, String>> {
        self.cluster_names.get(&index)
    }

    /// Assembles the accumulated elements into an interface declaration.
    pub fn build(self, name: InterfaceName) -> Result<InterfaceDecl, BuildError> {
        Ok(InterfaceDecl::from_indexed(name, self.generics, self.ports)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_bind::EntityName;

    fn uid(raw: u64) -> Uid {
        Uid::from_raw(raw)
    }

    fn entity_name(interner: &Interner) -> InterfaceName {
        InterfaceName::Entity(EntityName::new(
            interner,
            None,
            interner.intern_ident("e").unwrap(),
        ))
    }

    #[test]
    fn flat_panel_builds_interface() {
        let interner = Interner::new();
        let mut builder = InterfaceBuilder::new();
        builder.observe_panel(None, uid(1));
        builder
            .observe_control(
                uid(1),
                uid(2),
                Some("w : natural"),
                &ControlStyle::NumericI32,
                0,
                "",
                &interner,
            )
            .unwrap();
        builder
            .observe_control(
                uid(1),
                uid(3),
                Some("a : in std_logic"),
                &ControlStyle::NumericDbl,
                1,
                "",
                &interner,
            )
            .unwrap();
        let iface = builder.build(entity_name(&interner)).unwrap();
        assert_eq!(iface.generics().len(), 1);
        assert_eq!(iface.ports().len(), 1);
        assert_eq!(iface.generics()[0].connector_index, 0);
        assert_eq!(iface.ports()[0].connector_index, 1);
    }

    #[test]
    fn contested_connector_slot_surfaces_the_assembly_error() {
        let interner = Interner::new();
        let mut builder = InterfaceBuilder::new();
        builder.observe_panel(None, uid(1));
        for (raw, label) in [(2, "a : in std_logic"), (3, "b : in std_logic")] {
            builder
                .observe_control(
                    uid(1),
                    uid(raw),
                    Some(label),
                    &ControlStyle::NumericDbl,
                    0,
                    "",
                    &interner,
                )
                .unwrap();
        }
        let err = builder.build(entity_name(&interner)).unwrap_err();
        assert_eq!(
            err,
            BuildError::Iface(IfaceError::DuplicateConnectorIndex { index: 0 })
        );
    }

    #[test]
    fn missing_label_is_an_error() {
        let interner = Interner::new();
        let mut builder = InterfaceBuilder::new();
        builder.observe_panel(None, uid(1));
        let err = builder
            .observe_control(
                uid(1),
                uid(2),
                None,
                &ControlStyle::NumericDbl,
                0,
                "",
                &interner,
            )
            .unwrap_err();
        assert_eq!(err, BuildError::MissingLabel { uid: uid(2) });
    }

    #[test]
    fn unrecognized_style_is_an_error() {
        let interner = Interner::new();
        let mut builder = InterfaceBuilder::new();
        builder.observe_panel(None, uid(1));
        let err = builder
            .observe_control(
                uid(1),
                uid(2),
                Some("a : in std_logic"),
                &ControlStyle::Other("boolean".to_owned()),
                0,
                "",
                &interner,
            )
            .unwrap_err();
        assert!(matches!(err, BuildError::UnrecognizedStyle { .. }));
    }

    #[test]
    fn clustered_control_reads_virtual_index() {
        let interner = Interner::new();
        let mut builder = InterfaceBuilder::new();
        builder.observe_panel(None, uid(1));
        builder.observe_cluster(uid(10), 0, &[uid(11), uid(12)]);
        builder
            .observe_control(
                uid(10),
                uid(11),
                Some("a : in std_logic"),
                &ControlStyle::NumericDbl,
                0,
                " 1 ",
                &interner,
            )
            .unwrap();
        builder
            .observe_control(
                uid(10),
                uid(12),
                Some("w : natural"),
                &ControlStyle::NumericI32,
                0,
                "0",
                &interner,
            )
            .unwrap();
        assert!(builder.is_clustered());
        let names = builder.clustered_names(0).unwrap();
        assert_eq!(names.get(&0).map(String::as_str), Some("a : in std_logic"));
        assert_eq!(names.get(&1).map(String::as_str), Some("w : natural"));
        let iface = builder.build(entity_name(&interner)).unwrap();
        assert_eq!(iface.generics()[0].connector_index, 0);
        assert_eq!(iface.ports()[0].connector_index, 1);
    }

    #[test]
    fn clustered_control_with_bad_description_is_an_error() {
        let interner = Interner::new();
        let mut builder = InterfaceBuilder::new();
        builder.observe_panel(None, uid(1));
        builder.observe_cluster(uid(10), 0, &[uid(11)]);
        let err = builder
            .observe_control(
                uid(10),
                uid(11),
                Some("a : in std_logic"),
                &ControlStyle::NumericDbl,
                0,
                "first port",
                &interner,
            )
            .unwrap_err();
        assert!(matches!(err, BuildError::BadVirtualIndex { .. }));
    }

    #[test]
    fn mixed_ownership_is_an_error_both_ways() {
        let interner = Interner::new();
        let mut builder = InterfaceBuilder::new();
        builder.observe_panel(None, uid(1));
        // Not clustered, but owned by something else.
        let err = builder
            .observe_control(
                uid(5),
                uid(2),
                Some("a : in std_logic"),
                &ControlStyle::NumericDbl,
                0,
                "",
                &interner,
            )
            .unwrap_err();
        assert_eq!(err, BuildError::UnclusteredNonPanelOwner { uid: uid(2) });
        // Clustered, but owned by the front panel.
        builder.observe_cluster(uid(10), 0, &[uid(11)]);
        let err = builder
            .observe_control(
                uid(1),
                uid(3),
                Some("b : in std_logic"),
                &ControlStyle::NumericDbl,
                0,
                "",
                &interner,
            )
            .unwrap_err();
        assert_eq!(err, BuildError::ClusteredPanelOwner { uid: uid(3) });
    }
}
