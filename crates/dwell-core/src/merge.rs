//! Fair fan-in of two event sources.

use futures::stream::{self, Select, Stream};

/// Two streams interleaved by readiness. See [`merge`].
pub type Merge<A, B> = Select<A, B>;

/// Merges two streams of the same item type.
///
/// Each poll alternates which side is tried first, so a busy source cannot
/// starve the other. Items keep their per-source order and none are dropped.
/// The merged stream ends once both sides have ended.
pub fn merge<A, B>(a: A, b: B) -> Merge<A, B>
where
    A: Stream,
    B: Stream<Item = A::Item>,
{
    stream::select(a, b)
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;
    use futures::channel::mpsc;
    use futures::executor::block_on;
    use futures::stream::{FusedStream, StreamExt};

    use super::*;

    #[test]
    fn test_alternates_between_ready_sources() {
        let merged = merge(stream::iter(["a1", "a2", "a3"]), stream::iter(["b1", "b2"]));
        let items: Vec<_> = block_on(merged.collect());
        assert_eq!(items, vec!["a1", "b1", "a2", "b2", "a3"]);
    }

    #[test]
    fn test_preserves_per_source_order() {
        let merged = merge(stream::iter(0..100), stream::iter(1_000..1_050));
        let items: Vec<i32> = block_on(merged.collect());

        assert_eq!(items.len(), 150);
        let left: Vec<_> = items.iter().copied().filter(|n| *n < 1_000).collect();
        let right: Vec<_> = items.iter().copied().filter(|n| *n >= 1_000).collect();
        assert_eq!(left, (0..100).collect::<Vec<_>>());
        assert_eq!(right, (1_000..1_050).collect::<Vec<_>>());
    }

    #[test]
    fn test_pending_side_does_not_block_ready_side() {
        let (_idle_tx, idle_rx) = mpsc::unbounded::<&str>();
        let (niri_tx, niri_rx) = mpsc::unbounded::<&str>();
        let mut merged = merge(idle_rx, niri_rx);

        niri_tx.unbounded_send("focus").unwrap();
        assert_eq!(merged.next().now_or_never(), Some(Some("focus")));
        assert_eq!(merged.next().now_or_never(), None, "both sides pending");
    }

    #[test]
    fn test_ends_only_when_both_sides_end() {
        let (idle_tx, idle_rx) = mpsc::unbounded::<&str>();
        let (niri_tx, niri_rx) = mpsc::unbounded::<&str>();
        let mut merged = merge(idle_rx, niri_rx);

        drop(niri_tx);
        idle_tx.unbounded_send("timeout").unwrap();
        assert_eq!(merged.next().now_or_never(), Some(Some("timeout")));
        assert!(!merged.is_terminated());

        drop(idle_tx);
        assert_eq!(merged.next().now_or_never(), Some(None));
        assert!(merged.is_terminated());
    }
}
