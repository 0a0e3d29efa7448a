use serde::Serialize;

pub const SITE_NAME: &str = "RNAseek";
pub const SITE_DESCRIPTION: &str =
    "RNAseek: Comprehensive RNA sequencing analysis with bioinformatics tools";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    About,
    Contact,
    Tools,
}

/// A piece of static page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Heading(&'static str),
    Paragraph(&'static str),
    List(&'static [&'static str]),
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Contact => "/contact",
            Page::Tools => "/tools",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Contact => "Contact",
            Page::Tools => "Tools",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Welcome to RNAseek",
            Page::About => "About RNAseek",
            Page::Contact => "Contact and Troubleshooting",
            Page::Tools => "FASTQ File Analyzer",
        }
    }

    pub fn blocks(&self) -> &'static [Block] {
        match self {
            Page::Home => HOME,
            Page::About => ABOUT,
            Page::Contact => CONTACT,
            Page::Tools => &[],
        }
    }
}

const HOME: &[Block] = &[
    Block::Paragraph(
        "RNAseek is your one-stop platform for RNA-seq analysis, built to simplify the \
         bioinformatics workflow for professionals and researchers alike.",
    ),
    Block::Heading("Get Started"),
    Block::List(&[
        "Login or Sign Up: secure your data and personalize your analysis.",
        "Explore Tools: once logged in, upload FASTQ data for quality control, alignment, \
         quantification and differential expression analysis.",
    ]),
    Block::Heading("Why Choose RNAseek?"),
    Block::List(&[
        "Comprehensive Analysis: from pre-processing to pathway analysis in one place.",
        "User-Friendly Interface: a clean platform that runs in any modern browser.",
    ]),
];

const ABOUT: &[Block] = &[
    Block::Paragraph(
        "RNA sequencing (RNA-seq) lets researchers analyze gene expression across organisms \
         and experimental conditions, but its multi-step computational workflow is a barrier \
         without specialized bioinformatics expertise.",
    ),
    Block::Paragraph(
        "RNAseek is being developed as a web-based platform that turns raw sequencing data into \
         interpretable results, combining quality control, alignment, expression quantification \
         and functional analysis into a single pipeline.",
    ),
    Block::Paragraph(
        "The platform integrates tools such as FASTQC, Trimmomatic, HISAT2, STAR, FeatureCounts, \
         DESeq2, edgeR and GSEA.",
    ),
];

const CONTACT: &[Block] = &[
    Block::Heading("My data won't upload"),
    Block::Paragraph(
        "Most of the time the issue is the data format. Uploads accept .fastq and .fastq.gz \
         files; open your file in a text editor to check that it holds FASTQ records.",
    ),
    Block::Heading("Reporting a problem"),
    Block::List(&[
        "Indicate which data you used, or provide a copy of it.",
        "Document all steps leading to the issue, with screenshots where useful.",
    ]),
    Block::Paragraph(
        "Bugs are usually dealt with within 3 days of a validated report. New features are \
         prioritized based on overall user feedback.",
    ),
];
