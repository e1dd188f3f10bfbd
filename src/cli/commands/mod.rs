pub mod compress;
pub mod drafts;
pub mod remote;
pub mod steps;
