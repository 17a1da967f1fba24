use crate::error::{no_places_error, Error};

/// Rebuilds a full visiting order from an optimizer's permutation over the
/// intermediates.
///
/// `places[0]` stays first and the last place stays last. Each entry `i` of
/// `permutation` picks `places[i + 1]`. Out of range and repeated entries are
/// skipped, and intermediates the permutation never mentions follow in their
/// original order, so the output always has `places.len()` entries.
pub fn reconcile_route<T: Clone>(places: &[T], permutation: Option<&[usize]>) -> Result<Vec<T>, Error> {
    let m = places.len();
    if m == 0 {
        return Err(no_places_error());
    }
    if m <= 2 {
        return Ok(places.to_vec());
    }

    let intermediates = &places[1..m - 1];
    let mut visited = vec![false; intermediates.len()];
    let mut ordered = Vec::with_capacity(m);

    ordered.push(places[0].clone());

    for &index in permutation.unwrap_or_default() {
        match visited.get_mut(index) {
            Some(seen) if !*seen => {
                *seen = true;
                ordered.push(intermediates[index].clone());
            }
            Some(_) => tracing::debug!(index, "skipping repeated waypoint index"),
            None => tracing::debug!(index, "skipping out of range waypoint index"),
        }
    }

    for (place, seen) in intermediates.iter().zip(&visited) {
        if !seen {
            ordered.push(place.clone());
        }
    }

    ordered.push(places[m - 1].clone());

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE: [&str; 5] = ["origin", "p1", "p2", "p3", "destination"];

    #[test]
    fn applies_permutation_between_fixed_ends() {
        let ordered = reconcile_route(&ROUTE, Some(&[2, 0, 1])).unwrap();
        assert_eq!(ordered, vec!["origin", "p3", "p1", "p2", "destination"]);
    }

    #[test]
    fn identity_and_missing_permutations_keep_order() {
        assert_eq!(reconcile_route(&ROUTE, Some(&[0, 1, 2])).unwrap(), ROUTE.to_vec());
        assert_eq!(reconcile_route(&ROUTE, Some(&[])).unwrap(), ROUTE.to_vec());
        assert_eq!(reconcile_route(&ROUTE, None).unwrap(), ROUTE.to_vec());
    }

    #[test]
    fn malformed_indices_are_skipped() {
        let ordered = reconcile_route(&ROUTE, Some(&[7, 2, 2, 3])).unwrap();
        assert_eq!(ordered, vec!["origin", "p3", "p1", "p2", "destination"]);
    }

    #[test]
    fn ends_never_move() {
        for permutation in [vec![1, 0, 2], vec![2, 1, 0], vec![9, 9], vec![0]] {
            let ordered = reconcile_route(&ROUTE, Some(permutation.as_slice())).unwrap();
            assert_eq!(ordered.len(), ROUTE.len());
            assert_eq!(ordered[0], "origin");
            assert_eq!(ordered[4], "destination");
        }
    }

    #[test]
    fn short_lists_pass_through() {
        assert_eq!(reconcile_route(&["only"], Some(&[3])).unwrap(), vec!["only"]);
        assert_eq!(reconcile_route(&["a", "b"], Some(&[0])).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn empty_list_is_an_input_error() {
        let err = reconcile_route::<&str>(&[], None).unwrap_err();
        assert_eq!(err.code, 104);
    }
}
