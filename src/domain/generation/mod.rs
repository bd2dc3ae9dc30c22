//! Generation Context - 生成请求上下文
//!
//! 职责:
//! - 生成参数校验
//! - 上传素材句柄
//! - 单次请求与长视频请求的区分

mod errors;
mod request;
mod value_objects;

pub use errors::GenerationError;
pub use request::{GenerationRequest, GenerationRequestBuilder, LongMediaRequest, UploadedAsset};
pub use value_objects::{AssetId, CreativityCoefficient, MediaContentType, ModelVersion};
