// In-memory store implementations for tests
//
// Same contracts as the Postgres stores, backed by Vec state behind a
// Mutex. Each store can be switched into a failing mode to exercise
// store-unavailable propagation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::common::{CommentId, PostId, UserId};
use crate::domains::comments::models::{Comment, NewComment};
use crate::domains::posts::models::{NewPost, Post};
use crate::domains::users::models::{NewUser, User};
use crate::domains::auth::JwtService;
use crate::kernel::traits::{CommentStore, PostStore, UserStore};
use crate::kernel::ServerDeps;

/// Handles to the in-memory stores backing a [`ServerDeps`] built with
/// [`memory_deps`], for direct inspection and failure injection in tests.
pub struct TestStores {
    pub users: Arc<MemoryUserStore>,
    pub posts: Arc<MemoryPostStore>,
    pub comments: Arc<MemoryCommentStore>,
}

/// ServerDeps wired to fresh in-memory stores.
pub fn memory_deps(jwt_service: Arc<JwtService>) -> (ServerDeps, TestStores) {
    let stores = TestStores {
        users: MemoryUserStore::new(),
        posts: MemoryPostStore::new(),
        comments: MemoryCommentStore::new(),
    };
    let deps = ServerDeps::new(
        stores.users.clone(),
        stores.posts.clone(),
        stores.comments.clone(),
        jwt_service,
    );
    (deps, stores)
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    failing: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail, simulating an unavailable store.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("user store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        self.check_available()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.check_available()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>> {
        self.check_available()?;
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.check_available()?;
        let user = User {
            id: UserId::new(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            avatar_url: None,
            friends: Vec::new(),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct MemoryPostStore {
    posts: Mutex<Vec<Post>>,
    failing: AtomicBool,
}

impl MemoryPostStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("post store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>> {
        self.check_available()?;
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_creator(&self, creator: UserId) -> Result<Vec<Post>> {
        self.find_by_creators(&[creator]).await
    }

    async fn find_by_creators(&self, creators: &[UserId]) -> Result<Vec<Post>> {
        self.check_available()?;
        let posts = self.posts.lock().unwrap();
        let mut matching: Vec<Post> = posts
            .iter()
            .filter(|p| creators.contains(&p.creator))
            .cloned()
            .collect();
        matching.sort_by_key(|p| p.created_at);
        Ok(matching)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post> {
        self.check_available()?;
        let post = Post {
            id: PostId::new(),
            title: new_post.title,
            content: new_post.content,
            creator: new_post.creator,
            likes: Vec::new(),
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn save(&self, post: &Post) -> Result<Post> {
        self.check_available()?;
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.push(post.clone()),
        }
        Ok(post.clone())
    }
}

#[derive(Default)]
pub struct MemoryCommentStore {
    comments: Mutex<Vec<Comment>>,
    failing: AtomicBool,
}

impl MemoryCommentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("comment store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Comment>> {
        self.check_available()?;
        let comments = self.comments.lock().unwrap();
        let mut matching: Vec<Comment> = comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        matching.sort_by_key(|c| c.created_at);
        Ok(matching)
    }

    async fn create(&self, new_comment: NewComment) -> Result<Comment> {
        self.check_available()?;
        let comment = Comment {
            id: CommentId::new(),
            message: new_comment.message,
            post_id: new_comment.post_id,
            creator: new_comment.creator,
            created_at: Utc::now(),
        };
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }
}
