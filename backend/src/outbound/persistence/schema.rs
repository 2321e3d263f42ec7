//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` after schema changes.

diesel::table! {
    /// Users known to the service.
    users (user_id) {
        /// Caller-supplied identifier.
        user_id -> Text,
        /// Display name.
        username -> Text,
        /// Reviewer eligibility flag.
        is_active -> Bool,
        /// Account creation time; orders team members.
        created_at -> Timestamptz,
        /// Last modification time.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Teams keyed by their unique name.
    teams (team_name) {
        team_name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Team membership links.
    team_members (team_name, user_id) {
        team_name -> Text,
        user_id -> Text,
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pull requests and their lifecycle state.
    pull_requests (pull_request_id) {
        /// Caller-supplied identifier.
        pull_request_id -> Text,
        /// Title.
        pull_request_name -> Text,
        /// Authoring user.
        author_id -> Text,
        /// `OPEN` or `MERGED`.
        status -> Text,
        created_at -> Timestamptz,
        /// Set once, on the transition to `MERGED`.
        merged_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Reviewer assignments. `slot` keeps assignment order stable across
    /// reassignments.
    pull_request_reviewers (pull_request_id, user_id) {
        pull_request_id -> Text,
        user_id -> Text,
        slot -> Int2,
        assigned_at -> Timestamptz,
    }
}

diesel::joinable!(team_members -> teams (team_name));
diesel::joinable!(team_members -> users (user_id));
diesel::joinable!(pull_requests -> users (author_id));
diesel::joinable!(pull_request_reviewers -> pull_requests (pull_request_id));
diesel::joinable!(pull_request_reviewers -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    pull_request_reviewers,
    pull_requests,
    team_members,
    teams,
    users,
);
