pub mod organization;
pub mod user;
pub mod user_access_key;
pub mod profile;
pub mod player;

pub mod exam_period;
pub mod secondary_registration_period;
pub mod tournament_period;

pub mod exam_registration;
pub mod secondary_registration;
pub mod tournament_registration;
