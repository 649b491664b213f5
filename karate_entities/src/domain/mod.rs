pub mod belt;
pub mod organization_type;
pub mod period;
pub mod role;

pub use belt::Belt;
pub use organization_type::OrganizationType;
pub use period::PeriodKind;
pub use role::UserRole;
