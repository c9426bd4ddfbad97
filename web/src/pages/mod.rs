pub mod about;
pub mod contact;
pub mod detect;
pub mod home;
pub mod insights;
