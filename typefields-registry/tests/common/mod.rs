//! In-memory host used by the integration tests.
//!
//! Records every subscription and fires hooks back into the registry the
//! way the host's extension-point mechanism would.

#![allow(dead_code)]

use std::collections::HashMap;

use typefields_registry::{
    Entities, FieldRegistry, FormData, FormInput, HookArgs, HookName, HookOutput, HookRegistrar,
    HostError, MetaStore, PostId, Screen, Screens, Subscription, Term, TermId,
};

#[derive(Default)]
pub struct FakeHost {
    pub subscriptions: Vec<Subscription>,
    pub screen: Option<Screen>,
    pub terms: HashMap<TermId, Result<Term, HostError>>,
    pub posts: HashMap<PostId, String>,
    pub term_meta: HashMap<(TermId, String), String>,
    pub post_meta: HashMap<(PostId, String), String>,
    pub form: FormData,
    /// Everything handlers echoed, in order
    pub echoed: String,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscriptions under `hook`.
    pub fn subscribed(&self, hook: &str) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.hook.as_str() == hook)
            .count()
    }

    pub fn add_term(&mut self, id: u64, taxonomy: &str, name: &str) {
        self.terms
            .insert(TermId(id), Ok(Term::new(id, taxonomy, name)));
    }

    pub fn meta(&self, term_id: u64, key: &str) -> Option<&str> {
        self.term_meta
            .get(&(TermId(term_id), key.to_string()))
            .map(String::as_str)
    }

    /// Fire `hook` with `args` and collect the outputs of every subscriber.
    pub fn fire(&mut self, registry: &FieldRegistry, hook: HookName, args: HookArgs) -> Vec<HookOutput> {
        let callbacks: Vec<_> = self
            .subscriptions
            .iter()
            .filter(|s| s.hook == hook)
            .map(|s| s.callback)
            .collect();

        let mut outputs = Vec::new();
        for callback in callbacks {
            let output = registry
                .dispatch(&mut *self, callback, args.clone())
                .expect("dispatch succeeds");
            if let HookOutput::Echo(markup) = &output {
                self.echoed.push_str(markup);
            }
            outputs.push(output);
        }
        outputs
    }
}

impl HookRegistrar for FakeHost {
    fn subscribe(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }
}

impl Screens for FakeHost {
    fn current_screen(&self) -> Option<Screen> {
        self.screen.clone()
    }
}

impl Entities for FakeHost {
    fn get_term(&self, id: TermId) -> Result<Option<Term>, HostError> {
        self.terms.get(&id).cloned().transpose()
    }

    fn get_post_type(&self, id: PostId) -> Result<Option<String>, HostError> {
        Ok(self.posts.get(&id).cloned())
    }
}

impl MetaStore for FakeHost {
    fn get_term_meta(&self, term_id: TermId, key: &str) -> Option<String> {
        self.term_meta.get(&(term_id, key.to_string())).cloned()
    }

    fn get_post_meta(&self, post_id: PostId, key: &str) -> Option<String> {
        self.post_meta.get(&(post_id, key.to_string())).cloned()
    }

    fn update_term_meta(&mut self, term_id: TermId, key: &str, value: &str) -> Result<(), HostError> {
        self.term_meta
            .insert((term_id, key.to_string()), value.to_string());
        Ok(())
    }
}

impl FormInput for FakeHost {
    fn read_form_field(&self, key: &str) -> Option<String> {
        self.form.read_form_field(key)
    }
}
