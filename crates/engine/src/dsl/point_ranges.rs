//! Point thresholds for the partnership's combined values

pub struct PointRanges;

impl PointRanges {
    pub const SLAM_THRESHOLD: u8 = 33;
    pub const GRAND_SLAM_THRESHOLD: u8 = 37;
}
