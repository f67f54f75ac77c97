use crate::types::Node;

use super::{get_l, get_p, get_r, replace_child, set_l, set_p, set_r};

/// Exchanges the tree positions of `x` and `y` without touching payload.
///
/// Afterwards each node occupies exactly the slot the other one held, with
/// that slot's parent and children. Returns the (possibly new) root.
pub fn swap<N: Node>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    if get_p(arena, y) == Some(x) {
        swap_adjacent(arena, root, x, y)
    } else if get_p(arena, x) == Some(y) {
        swap_adjacent(arena, root, y, x)
    } else {
        swap_unrelated(arena, root, x, y)
    }
}

/// `lower` is a direct child of `upper`.
fn swap_adjacent<N: Node>(arena: &mut [N], root: u32, upper: u32, lower: u32) -> u32 {
    let gp = get_p(arena, upper);
    let ul = get_l(arena, upper);
    let ur = get_r(arena, upper);
    let ll = get_l(arena, lower);
    let lr = get_r(arena, lower);

    replace_child(arena, gp, upper, Some(lower));

    if ul == Some(lower) {
        set_l(arena, lower, Some(upper));
        set_r(arena, lower, ur);
        if let Some(ur) = ur {
            set_p(arena, ur, Some(lower));
        }
    } else {
        set_r(arena, lower, Some(upper));
        set_l(arena, lower, ul);
        if let Some(ul) = ul {
            set_p(arena, ul, Some(lower));
        }
    }
    set_p(arena, upper, Some(lower));

    set_l(arena, upper, ll);
    if let Some(ll) = ll {
        set_p(arena, ll, Some(upper));
    }
    set_r(arena, upper, lr);
    if let Some(lr) = lr {
        set_p(arena, lr, Some(upper));
    }

    if gp.is_none() {
        lower
    } else {
        root
    }
}

fn swap_unrelated<N: Node>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32 {
    let xp = get_p(arena, x);
    let xl = get_l(arena, x);
    let xr = get_r(arena, x);
    let yp = get_p(arena, y);
    let yl = get_l(arena, y);
    let yr = get_r(arena, y);

    set_l(arena, x, yl);
    set_r(arena, x, yr);
    set_l(arena, y, xl);
    set_r(arena, y, xr);
    for child in [yl, yr].into_iter().flatten() {
        set_p(arena, child, Some(x));
    }
    for child in [xl, xr].into_iter().flatten() {
        set_p(arena, child, Some(y));
    }

    if xp.is_some() && xp == yp {
        // siblings: the shared parent just trades its two slots
        let p = xp.expect("siblings share a parent");
        let pl = get_l(arena, p);
        let pr = get_r(arena, p);
        set_l(arena, p, pr);
        set_r(arena, p, pl);
        return root;
    }

    replace_child(arena, xp, x, Some(y));
    replace_child(arena, yp, y, Some(x));

    if xp.is_none() {
        y
    } else if yp.is_none() {
        x
    } else {
        root
    }
}
