//! 8-neighbour bitmasks and the 47 blob categories.

/// Bitmask of same-terrain neighbours: N=1, NE=2, E=4, SE=8, S=16, SW=32, W=64, NW=128.
pub type Bitmask = u8;

pub const N: Bitmask = 1;
pub const NE: Bitmask = 2;
pub const E: Bitmask = 4;
pub const SE: Bitmask = 8;
pub const S: Bitmask = 16;
pub const SW: Bitmask = 32;
pub const W: Bitmask = 64;
pub const NW: Bitmask = 128;

/// Which of the eight surrounding cells hold the same terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub n: bool,
    pub ne: bool,
    pub e: bool,
    pub se: bool,
    pub s: bool,
    pub sw: bool,
    pub w: bool,
    pub nw: bool,
}

impl Neighbors {
    /// Every neighbour set.
    pub const ALL: Self = Self {
        n: true,
        ne: true,
        e: true,
        se: true,
        s: true,
        sw: true,
        w: true,
        nw: true,
    };
}

/// Encode neighbours as a blob bitmask.
///
/// A diagonal only counts when both of its adjacent edges are present, so
/// the 256 raw combinations collapse onto the 47 entries of [`BLOB47`].
pub fn compute_bitmask(neighbors: &Neighbors) -> Bitmask {
    let Neighbors {
        n,
        ne,
        e,
        se,
        s,
        sw,
        w,
        nw,
    } = *neighbors;

    let mut mask = 0;
    if n {
        mask |= N;
    }
    if e {
        mask |= E;
    }
    if s {
        mask |= S;
    }
    if w {
        mask |= W;
    }
    if ne && n && e {
        mask |= NE;
    }
    if se && s && e {
        mask |= SE;
    }
    if sw && s && w {
        mask |= SW;
    }
    if nw && n && w {
        mask |= NW;
    }
    mask
}

/// The 47 valid blob bitmasks and their category names, in ascending order.
pub const BLOB47: [(Bitmask, &str); 47] = [
    (0, "isolated"),
    (1, "n_only"),
    (4, "e_only"),
    (5, "ne_corner"),
    (7, "ne_corner_filled"),
    (16, "s_only"),
    (17, "ns_pipe"),
    (20, "se_corner"),
    (21, "nse_tee"),
    (23, "nse_inner_se"),
    (28, "se_corner_filled"),
    (29, "nse_inner_ne"),
    (31, "nse_both"),
    (64, "w_only"),
    (65, "nw_corner"),
    (68, "ew_pipe"),
    (69, "new_tee"),
    (71, "new_inner_ne"),
    (80, "sw_corner"),
    (81, "nsw_tee"),
    (84, "sew_tee"),
    (85, "cross"),
    (87, "cross_ne"),
    (92, "sew_inner_se"),
    (93, "cross_se"),
    (95, "cross_ne_se"),
    (112, "sw_corner_filled"),
    (113, "nsw_inner_sw"),
    (116, "sew_inner_sw"),
    (117, "cross_sw"),
    (119, "cross_ne_sw"),
    (124, "sew_both"),
    (125, "cross_se_sw"),
    (127, "cross_ne_se_sw"),
    (193, "nw_corner_filled"),
    (197, "new_inner_nw"),
    (199, "new_both"),
    (209, "nsw_inner_nw"),
    (213, "cross_nw"),
    (215, "cross_nw_se"),
    (221, "cross_nw_sw"),
    (223, "cross_nw_ne_se"),
    (241, "nsw_both"),
    (245, "cross_nw_ne"),
    (247, "cross_nw_se_sw"),
    (253, "cross_nw_ne_sw"),
    (255, "full"),
];

/// Category name for a bitmask, if it is one of the 47.
pub fn category_name(mask: Bitmask) -> Option<&'static str> {
    BLOB47
        .binary_search_by_key(&mask, |&(m, _)| m)
        .ok()
        .map(|i| BLOB47[i].1)
}
