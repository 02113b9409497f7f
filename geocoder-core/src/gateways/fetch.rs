use std::{rc::Rc, sync::Arc};

/// Retrieves the raw body of a resource.
///
/// Implementations own the transport policy (timeouts, headers, TLS).
/// Errors are passed through to the caller untouched.
pub trait ContentFetcher {
    fn get_content(&self, url: &str) -> anyhow::Result<String>;
}

impl<F> ContentFetcher for &F
where
    F: ContentFetcher + ?Sized,
{
    fn get_content(&self, url: &str) -> anyhow::Result<String> {
        (**self).get_content(url)
    }
}

impl<F> ContentFetcher for Box<F>
where
    F: ContentFetcher + ?Sized,
{
    fn get_content(&self, url: &str) -> anyhow::Result<String> {
        (**self).get_content(url)
    }
}

impl<F> ContentFetcher for Rc<F>
where
    F: ContentFetcher + ?Sized,
{
    fn get_content(&self, url: &str) -> anyhow::Result<String> {
        (**self).get_content(url)
    }
}

impl<F> ContentFetcher for Arc<F>
where
    F: ContentFetcher + ?Sized,
{
    fn get_content(&self, url: &str) -> anyhow::Result<String> {
        (**self).get_content(url)
    }
}
