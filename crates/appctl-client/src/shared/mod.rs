mod app;
mod app_record;
mod create_app_request;

pub use app::App;
pub use app_record::{
    AppMetadata, AppRecord, AppSpec, AppStatus, Condition, Container, ContainerPort, PodSpec,
    RevisionTemplate,
};
pub use create_app_request::{CreateAppRequest, EnvVar};
