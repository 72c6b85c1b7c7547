mod storage;

pub(crate) use storage::{RawTree, Stack};
