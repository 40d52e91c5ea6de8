use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting match export...");

        let snapshot = self.pipeline.extract().await?;
        tracing::info!(
            "📥 Loaded snapshot with {} profiles (taken at {})",
            snapshot.users.len(),
            snapshot.taken_at
        );

        let result = self.pipeline.transform(snapshot).await?;
        tracing::info!("🔗 Computed {} matches", result.summary.match_count);

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }
}
