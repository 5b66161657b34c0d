// Library exports for hicpart
pub mod anchors;
pub mod bam;
pub mod contacts;
pub mod contigs;
pub mod input;
pub mod linkage;
pub mod partition;
pub mod report;
pub mod union_find;
