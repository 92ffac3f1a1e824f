#[cfg(test)]
pub mod http_api_tests;
#[cfg(test)]
pub mod publish_flow_tests;
