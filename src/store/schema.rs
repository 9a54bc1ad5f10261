use crate::config::StreamSwitches;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    I32,
    F64,
    Bool,
    /// Variable-length list of numbers, `;`-separated inside one cell.
    List,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

// events + logbook columns live in the primary file
const EVENTS_FIELDS: &[FieldSpec] = &[
    field("run_id", FieldKind::I32),
    field("event_id", FieldKind::I32),
    field("nchannels", FieldKind::I32),
    field("baseline_not_found", FieldKind::Bool),
    field("lifetime", FieldKind::F64),
    field("inhibittime", FieldKind::F64),
    field("npulses", FieldKind::I32),
    field("total_s1_corr", FieldKind::F64),
    field("total_s2_corr", FieldKind::F64),
    field("total_f90", FieldKind::F64),
    field("s1_start_time", FieldKind::F64),
    field("total_s2_f90_fixed", FieldKind::F64),
    field("max_s1_frac_cut_exceeds99", FieldKind::I32),
    field("tpc_digital_sum", FieldKind::F64),
];

const ALLPULSES_FIELDS: &[FieldSpec] = &[field("has_s3", FieldKind::Bool)];

const MASAS_FIELDS: &[FieldSpec] = &[
    field("masas_x", FieldKind::F64),
    field("masas_y", FieldKind::F64),
    field("masas_xycorr_factor", FieldKind::F64),
];

const XYL_FIELDS: &[FieldSpec] = &[
    field("xyl_x", FieldKind::F64),
    field("xyl_y", FieldKind::F64),
    field("xyl_xycorr_factor", FieldKind::F64),
];

const AWW_FIELDS: &[FieldSpec] = &[
    field("aww_x", FieldKind::F64),
    field("aww_y", FieldKind::F64),
    field("aww_xycorr_factor", FieldKind::F64),
];

const VETO_FIELDS: &[FieldSpec] = &[
    field("veto_present", FieldKind::Bool),
    field("veto_run_id", FieldKind::I32),
    field("veto_event_id", FieldKind::I32),
    field("veto_cluster_charge_vec", FieldKind::List),
];

/// Per-event record streams. `Events` is the primary; the rest are friends
/// joined to it by record index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stream {
    Events,
    #[strum(serialize = "allpulses")]
    AllPulses,
    MasasXy,
    XylocatorXy,
    AwwXy,
    VetoCluster,
}

impl Stream {
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Events => EVENTS_FIELDS,
            Self::AllPulses => ALLPULSES_FIELDS,
            Self::MasasXy => MASAS_FIELDS,
            Self::XylocatorXy => XYL_FIELDS,
            Self::AwwXy => AWW_FIELDS,
            Self::VetoCluster => VETO_FIELDS,
        }
    }

    /// File-name suffix appended to the primary file stem. `None` for the primary.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Events => None,
            Self::AllPulses => Some("_allpulses"),
            Self::MasasXy => Some("_masas_xy"),
            Self::XylocatorXy => Some("_xylocator_xy"),
            Self::AwwXy => Some("_aww_xy"),
            Self::VetoCluster => Some("_veto_cluster"),
        }
    }

    pub fn is_enabled(&self, switches: &StreamSwitches) -> bool {
        match self {
            Self::Events => true,
            Self::AllPulses => switches.load_allpulses,
            Self::MasasXy => switches.load_masas_xy,
            Self::XylocatorXy => switches.load_xyl_xy,
            Self::AwwXy => switches.load_aww_xy,
            Self::VetoCluster => switches.load_veto,
        }
    }

    pub fn satellites() -> impl Iterator<Item = Stream> {
        Stream::iter().filter(|s| *s != Stream::Events)
    }

    /// Which stream declares `name`, if any.
    pub fn owner_of(name: &str) -> Option<Stream> {
        Stream::iter().find(|s| s.fields().iter().any(|f| f.name == name))
    }
}
