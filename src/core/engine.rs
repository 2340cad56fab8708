use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ProposalEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ProposalEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting proposal generation...");

        // Extract
        println!("Parsing RFP document...");
        let document = self.pipeline.extract().await?;
        println!(
            "Parsed '{}' ({} characters)",
            document.file_name,
            document.char_count()
        );

        // Transform
        println!("Generating proposal content... This may take a few moments.");
        let proposal = self.pipeline.transform(document).await?;
        println!("Generated {} proposal sections", proposal.section_count());

        // Load
        println!("Writing proposal...");
        let destination = self.pipeline.load(proposal).await?;

        Ok(destination)
    }
}
