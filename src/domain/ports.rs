use crate::domain::model::{Proposal, RfpDocument};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn rfp_file(&self) -> &str;
    fn technology(&self) -> &str;
    fn output_file(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RfpDocument>;
    async fn transform(&self, document: RfpDocument) -> Result<Proposal>;
    async fn load(&self, proposal: Proposal) -> Result<String>;
}
