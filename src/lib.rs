#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_record as record;
pub use vc_token as token;
pub use vc_utils as utils;
