#![allow(dead_code)]

mod mock_upstream;

pub use mock_upstream::{
    a_record, query_message, FixedSelector, MockUpstreamExchanger, SequenceSelector,
};
