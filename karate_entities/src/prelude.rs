pub use crate::domain::{Belt, OrganizationType, PeriodKind, UserRole};
pub use crate::queries::{NewRegistration, Period, PeriodInput, QueryError, RegistrationRow};
