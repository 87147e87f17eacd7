//! Process-local table set shared by the in-memory store

use std::collections::HashMap;

use blog_core::entities::{
    Blog, Comment, Reaction, ReactionCounts, ReactionTally, Stance, Subject, ViewMark,
};
use blog_core::value_objects::{BlogId, CommentId, UserId};

/// All rows of the in-memory store
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    pub blogs: HashMap<BlogId, Blog>,
    pub comments: HashMap<CommentId, Comment>,
    pub reactions: HashMap<(Subject, UserId), Reaction>,
    pub views: HashMap<(BlogId, UserId), ViewMark>,
}

impl MemoryState {
    pub fn subject_exists(&self, subject: Subject) -> bool {
        match subject {
            Subject::Blog(id) => self.blogs.contains_key(&id),
            Subject::Comment(id) => self.comments.contains_key(&id),
        }
    }

    pub fn reaction_counts(&self, subject: Subject) -> Option<ReactionCounts> {
        match subject {
            Subject::Blog(id) => self.blogs.get(&id).map(|b| b.counters.reactions),
            Subject::Comment(id) => self.comments.get(&id).map(|c| c.reactions),
        }
    }

    pub fn reaction_counts_mut(&mut self, subject: Subject) -> Option<&mut ReactionCounts> {
        match subject {
            Subject::Blog(id) => self.blogs.get_mut(&id).map(|b| &mut b.counters.reactions),
            Subject::Comment(id) => self.comments.get_mut(&id).map(|c| &mut c.reactions),
        }
    }

    pub fn tally(&self, subject: Subject) -> ReactionTally {
        self.reactions
            .values()
            .filter(|r| r.subject == subject)
            .fold(ReactionTally::default(), |mut tally, r| {
                match r.stance {
                    Stance::Like => tally.likes += 1,
                    Stance::Dislike => tally.dislikes += 1,
                }
                tally
            })
    }

    /// Remove a comment and every reaction on it
    pub fn remove_comment(&mut self, id: CommentId) -> Option<Comment> {
        let removed = self.comments.remove(&id)?;
        self.reactions
            .retain(|(subject, _), _| *subject != Subject::Comment(id));
        Some(removed)
    }

    /// Remove a blog with its comments, reactions and view marks
    pub fn remove_blog(&mut self, id: BlogId) -> bool {
        if self.blogs.remove(&id).is_none() {
            return false;
        }
        let comment_ids: Vec<CommentId> = self
            .comments
            .values()
            .filter(|c| c.blog_id == id)
            .map(|c| c.id)
            .collect();
        for comment_id in comment_ids {
            self.remove_comment(comment_id);
        }
        self.reactions
            .retain(|(subject, _), _| *subject != Subject::Blog(id));
        self.views.retain(|(blog_id, _), _| *blog_id != id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_blog_cascades() {
        let mut state = MemoryState::default();
        let blog = Blog::new(UserId::new(), "t".to_string(), "c".to_string());
        let comment = Comment::new(blog.id, UserId::new(), "hi".to_string());
        let user = UserId::new();

        state.reactions.insert(
            (Subject::Blog(blog.id), user),
            Reaction::new(Subject::Blog(blog.id), user, Stance::Like),
        );
        state.reactions.insert(
            (Subject::Comment(comment.id), user),
            Reaction::new(Subject::Comment(comment.id), user, Stance::Dislike),
        );
        state.views.insert((blog.id, user), ViewMark::new(blog.id, user));
        state.comments.insert(comment.id, comment);
        state.blogs.insert(blog.id, blog.clone());

        assert!(state.remove_blog(blog.id));
        assert!(state.comments.is_empty());
        assert!(state.reactions.is_empty());
        assert!(state.views.is_empty());
        assert!(!state.remove_blog(blog.id));
    }

    #[test]
    fn test_tally_counts_only_the_subject() {
        let mut state = MemoryState::default();
        let a = Subject::Blog(BlogId::new());
        let b = Subject::Blog(BlogId::new());
        for (subject, stance) in [(a, Stance::Like), (a, Stance::Dislike), (b, Stance::Like)] {
            let user = UserId::new();
            state
                .reactions
                .insert((subject, user), Reaction::new(subject, user, stance));
        }

        assert_eq!(state.tally(a), ReactionTally { likes: 1, dislikes: 1 });
        assert_eq!(state.tally(b), ReactionTally { likes: 1, dislikes: 0 });
    }
}
