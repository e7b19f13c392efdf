pub mod confirm_step4;
pub mod mapping_step2;
pub mod upload_step1;
pub mod validation_step3;

pub use confirm_step4::ConfirmStep4;
pub use mapping_step2::MappingStep2;
pub use upload_step1::UploadStep1;
pub use validation_step3::ValidationStep3;
