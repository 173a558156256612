//! Tenant scope guard.
//!
//! A scope binds `(tenant id, tenant domain)` to the current thread for
//! the duration of a tenant-partitioned operation. The binding is held
//! by an RAII guard and cleared on drop, so it is released on every
//! exit path, including unwinding.

use std::cell::RefCell;

use crate::error::ScopeError;

thread_local! {
    static ACTIVE: RefCell<Option<TenantBinding>> = const { RefCell::new(None) };
}

/// The tenant identity bound to the current thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantBinding {
    /// Numeric tenant id.
    pub tenant_id: i32,
    /// Tenant domain name.
    pub tenant_domain: String,
}

/// RAII guard for a tenant scope.
///
/// Dropping the guard ends the scope. Nested scopes are unsupported and
/// rejected at entry.
#[derive(Debug)]
pub struct TenantScope {
    // Non-Send by construction: the binding lives in a thread-local and
    // must be released on the thread that entered it.
    _not_send: std::marker::PhantomData<*const ()>,
}

impl TenantScope {
    /// Begins a tenant scope on the current thread.
    ///
    /// ## Errors
    ///
    /// Returns `ScopeError::NestedScope` if a scope is already active on
    /// this thread.
    pub fn enter(tenant_id: i32, tenant_domain: impl Into<String>) -> Result<Self, ScopeError> {
        ACTIVE.with(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(active) = slot.as_ref() {
                return Err(ScopeError::NestedScope {
                    active: active.tenant_id,
                });
            }
            *slot = Some(TenantBinding {
                tenant_id,
                tenant_domain: tenant_domain.into(),
            });
            Ok(Self {
                _not_send: std::marker::PhantomData,
            })
        })
    }

    /// Returns the binding active on the current thread, if any.
    #[must_use]
    pub fn current() -> Option<TenantBinding> {
        ACTIVE.with(|slot| slot.borrow().clone())
    }
}

impl Drop for TenantScope {
    fn drop(&mut self) {
        ACTIVE.with(|slot| {
            *slot.borrow_mut() = None;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_binds_and_releases() {
        assert!(TenantScope::current().is_none());
        {
            let _scope = TenantScope::enter(42, "acme.com").unwrap();
            let binding = TenantScope::current().unwrap();
            assert_eq!(binding.tenant_id, 42);
            assert_eq!(binding.tenant_domain, "acme.com");
        }
        assert!(TenantScope::current().is_none());
    }

    #[test]
    fn nested_scope_is_rejected() {
        let _outer = TenantScope::enter(1, "one.com").unwrap();
        let inner = TenantScope::enter(2, "two.com");
        assert_eq!(inner.unwrap_err(), ScopeError::NestedScope { active: 1 });
        // The rejected entry must not have clobbered the outer binding.
        assert_eq!(TenantScope::current().unwrap().tenant_id, 1);
    }

    #[test]
    fn scope_is_released_on_unwind() {
        let result = std::panic::catch_unwind(|| {
            let _scope = TenantScope::enter(7, "panic.com").unwrap();
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(TenantScope::current().is_none());
    }

    #[test]
    fn scope_is_per_thread() {
        let _scope = TenantScope::enter(5, "main.com").unwrap();
        let seen = std::thread::spawn(TenantScope::current).join().unwrap();
        assert!(seen.is_none());
    }
}
