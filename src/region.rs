/// A region label. Region ids are assigned by line order in the text format:
/// the first region line is region 0, and ids form a gapless range from there.
pub type RegionId = usize;
