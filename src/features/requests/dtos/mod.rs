mod request_dto;

pub use request_dto::{
    AttachmentUpload, CreateRequestDto, RequestResponseDto, UpdateRequestStatusDto,
};
