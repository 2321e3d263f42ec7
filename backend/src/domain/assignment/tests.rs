//! Tests for reviewer selection and reassignment rules.

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    PullRequestDraft, PullRequestId, PullRequestStatus, PullRequestTitle, Username,
};

fn uid(raw: &str) -> UserId {
    UserId::new(raw).expect("user id")
}

fn member(raw: &str, active: bool) -> User {
    User::new(uid(raw), Username::new(raw).expect("username"), active)
}

fn pull_request(status: PullRequestStatus, reviewers: &[&str]) -> PullRequest {
    PullRequest::new(PullRequestDraft {
        id: PullRequestId::new("pr-1").expect("id"),
        title: PullRequestTitle::new("Refactor cache").expect("title"),
        author_id: uid("author"),
        status,
        assigned_reviewers: reviewers.iter().map(|raw| uid(raw)).collect(),
        created_at: Utc::now(),
        merged_at: (status == PullRequestStatus::Merged).then(Utc::now),
    })
    .expect("valid pull request")
}

#[fixture]
fn team() -> Vec<User> {
    vec![
        member("author", true),
        member("r1", true),
        member("r2", true),
        member("r3", true),
        member("idle", false),
    ]
}

struct FirstPicker;

impl ReviewerPicker for FirstPicker {
    fn pick(&self, pool: &[UserId]) -> Option<UserId> {
        pool.first().cloned()
    }
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 2)]
#[case(3, 2)]
#[case(5, 2)]
fn reviewer_count_is_min_of_pool_and_cap(#[case] pool_size: usize, #[case] expected: usize) {
    let candidates: Vec<User> = (0..pool_size)
        .map(|index| member(&format!("u{index}"), true))
        .collect();
    let picked = select_reviewers(&uid("author"), &candidates);
    assert_eq!(picked.len(), expected);
}

#[rstest]
fn selection_keeps_supplied_order() {
    let candidates = vec![member("r3", true), member("r1", true), member("r2", true)];
    let picked = select_reviewers(&uid("author"), &candidates);
    assert_eq!(picked, vec![uid("r3"), uid("r1")]);
}

#[rstest]
fn selection_skips_author_inactive_and_duplicates(team: Vec<User>) {
    let mut candidates = vec![member("idle", false), member("r1", true), member("r1", true)];
    candidates.extend(team);
    let picked = select_reviewers(&uid("author"), &candidates);
    assert_eq!(picked, vec![uid("r1"), uid("r2")]);
}

#[rstest]
fn merged_pull_request_is_refused_before_assignment_check() {
    let pr = pull_request(PullRequestStatus::Merged, &["r1"]);
    assert_eq!(
        ensure_reassignable(&pr, &uid("stranger")),
        Err(AssignmentError::PullRequestMerged)
    );
}

#[rstest]
fn unassigned_reviewer_is_refused() {
    let pr = pull_request(PullRequestStatus::Open, &["r1"]);
    assert_eq!(
        ensure_reassignable(&pr, &uid("r2")),
        Err(AssignmentError::NotAssigned {
            reviewer_id: uid("r2")
        })
    );
}

#[rstest]
fn assigned_reviewer_on_open_pull_request_is_accepted() {
    let pr = pull_request(PullRequestStatus::Open, &["r1", "r2"]);
    assert_eq!(ensure_reassignable(&pr, &uid("r2")), Ok(()));
}

#[rstest]
fn pool_excludes_old_reviewer_author_and_current_reviewers(team: Vec<User>) {
    let pr = pull_request(PullRequestStatus::Open, &["r1", "r2"]);
    let pool = replacement_pool(&pr, &uid("r1"), &team, ReassignmentPolicy::default());
    assert_eq!(pool, vec![uid("r3")]);
}

#[rstest]
fn pool_includes_inactive_members_only_when_allowed(team: Vec<User>) {
    let pr = pull_request(PullRequestStatus::Open, &["r1", "r2"]);
    let pool = replacement_pool(
        &pr,
        &uid("r1"),
        &team,
        ReassignmentPolicy::including_inactive(),
    );
    assert_eq!(pool, vec![uid("r3"), uid("idle")]);
}

#[rstest]
fn exhausted_pool_reports_no_candidate() {
    let team = vec![member("author", true), member("r1", true), member("idle", false)];
    let pr = pull_request(PullRequestStatus::Open, &["r1"]);
    let pool = replacement_pool(&pr, &uid("r1"), &team, ReassignmentPolicy::default());
    assert!(pool.is_empty());
    assert_eq!(
        choose_replacement(&pool, &FirstPicker),
        Err(AssignmentError::NoCandidate)
    );
}

#[rstest]
fn replacement_comes_from_the_picker(team: Vec<User>) {
    let pr = pull_request(PullRequestStatus::Open, &["r2"]);
    let pool = replacement_pool(&pr, &uid("r2"), &team, ReassignmentPolicy::default());
    assert_eq!(pool, vec![uid("r1"), uid("r3")]);

    let mut picker = MockReviewerPicker::new();
    picker
        .expect_pick()
        .times(1)
        .returning(|pool| pool.last().cloned());
    assert_eq!(choose_replacement(&pool, &picker), Ok(uid("r3")));
}
