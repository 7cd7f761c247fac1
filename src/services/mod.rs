pub mod table_service;
pub mod composer_service;
pub mod chart_service;
pub mod dashboard_service;
