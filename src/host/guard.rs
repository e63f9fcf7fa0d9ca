//! Scoped activation of a viewport.

use super::Host;
use crate::model::{HostError, ViewportId};
use std::ops::{Deref, DerefMut};
use tracing::warn;

/// Restores the host's previously active viewport when dropped.
///
/// Every path out of the guarded scope (early return, `?`, panic unwind)
/// puts focus back where it was. If the previous viewport was closed in the
/// meantime there is nothing to restore and focus stays where the host left it.
pub struct ActiveViewportGuard<'a, H: Host + ?Sized> {
    host: &'a mut H,
    previous: Option<ViewportId>,
}

impl<'a, H: Host + ?Sized> ActiveViewportGuard<'a, H> {
    /// Activate `target`, remembering the currently active viewport.
    pub fn activate(host: &'a mut H, target: ViewportId) -> Result<Self, HostError> {
        let previous = host.active_viewport();
        if previous != Some(target) {
            host.set_active_viewport(target)?;
        }
        Ok(Self { host, previous })
    }

    /// Remember the currently active viewport without switching.
    ///
    /// For operations where the host itself moves focus (e.g. splitting).
    pub fn preserve(host: &'a mut H) -> Self {
        let previous = host.active_viewport();
        Self { host, previous }
    }

    /// Viewport that will be restored on drop.
    pub fn previous(&self) -> Option<ViewportId> {
        self.previous
    }
}

impl<H: Host + ?Sized> Deref for ActiveViewportGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Host + ?Sized> DerefMut for ActiveViewportGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Host + ?Sized> Drop for ActiveViewportGuard<'_, H> {
    fn drop(&mut self) {
        let Some(previous) = self.previous else {
            return;
        };
        if self.host.active_viewport() == Some(previous) || !self.host.viewport_is_valid(previous)
        {
            return;
        }
        if let Err(err) = self.host.set_active_viewport(previous) {
            warn!(viewport = %previous, error = %err, "Failed to restore active viewport");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn two_pane_host() -> (MemoryHost, ViewportId, ViewportId) {
        let mut host = MemoryHost::new();
        let doc = host.add_document(100);
        let group = host.add_group();
        let left = host.open_viewport(group, doc, 20);
        let right = host.open_viewport(group, doc, 20);
        host.set_active_viewport(left).expect("left is valid");
        (host, left, right)
    }

    #[test]
    fn activate_switches_and_restores_on_drop() {
        let (mut host, left, right) = two_pane_host();
        {
            let guard = ActiveViewportGuard::activate(&mut host, right).expect("valid");
            assert_eq!(guard.active_viewport(), Some(right));
            assert_eq!(guard.previous(), Some(left));
        }
        assert_eq!(host.active_viewport(), Some(left));
    }

    #[test]
    fn restores_on_error_path() {
        let (mut host, left, right) = two_pane_host();
        fn failing(host: &mut MemoryHost, target: ViewportId) -> Result<(), HostError> {
            let guard = ActiveViewportGuard::activate(host, target)?;
            guard.top_line(ViewportId::new(9999))?;
            Ok(())
        }
        assert!(failing(&mut host, right).is_err());
        assert_eq!(host.active_viewport(), Some(left));
    }

    #[test]
    fn activate_on_invalid_target_fails_without_switching() {
        let (mut host, left, _right) = two_pane_host();
        let result = ActiveViewportGuard::activate(&mut host, ViewportId::new(9999));
        assert!(matches!(result, Err(HostError::InvalidViewport(_))));
        drop(result);
        assert_eq!(host.active_viewport(), Some(left));
    }

    #[test]
    fn closed_previous_viewport_is_not_restored() {
        let (mut host, left, right) = two_pane_host();
        {
            let mut guard = ActiveViewportGuard::activate(&mut host, right).expect("valid");
            guard.close(left);
        }
        assert_eq!(host.active_viewport(), Some(right));
    }

    #[test]
    fn preserve_restores_after_host_moves_focus() {
        let (mut host, left, right) = two_pane_host();
        {
            let mut guard = ActiveViewportGuard::preserve(&mut host);
            guard.set_active_viewport(right).expect("valid");
        }
        assert_eq!(host.active_viewport(), Some(left));
    }
}
