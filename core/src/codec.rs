//! Base serializers: the leaf of every pipeline.

mod bincode_codec;
mod codec_id;
mod json;
mod message_pack;
mod serializer;
mod stream;


pub use self::{
  bincode_codec::*, codec_id::*, json::*, message_pack::*, serializer::*, stream::*,
};
