//! Mapping from `ferrous_relay_domain::RecordType` to `hickory_proto::rr::RecordType`.
//!
//! Keyed by the wire code, so unknown types are forwarded unchanged.

use ferrous_relay_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }
}
