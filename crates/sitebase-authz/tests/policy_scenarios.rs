//! End-to-end policy scenarios over the standard registry.

use jiff::{Span, Timestamp};
use sitebase_authz::{
    AuthzResult, Decision, Operation, PolicyEngine, RequestContext, ResourceKind, ResourceRef,
};
use sitebase_store::model::{NewDocument, NewProject, NewProjectMember, NewShareToken};
use sitebase_store::query::{
    DocumentRepository, ProjectMemberRepository, ProjectRepository, RoleRepository,
    ShareTokenRepository,
};
use sitebase_store::types::{AppRole, MemberPosition, TokenKind};
use sitebase_store::MemStore;
use uuid::Uuid;

/// A project with one secondary member, plus frequently-used account ids.
struct Fixture {
    engine: PolicyEngine,
    project_id: Uuid,
    member_id: Uuid,
    outsider_id: Uuid,
    admin_id: Uuid,
}

async fn fixture() -> AuthzResult<Fixture> {
    let store = MemStore::new();
    let member_id = Uuid::new_v4();
    let outsider_id = Uuid::new_v4();
    let admin_id = Uuid::new_v4();

    let project = store
        .create_project(NewProject {
            name: "Riverside substation".to_owned(),
            reference: "RS-114".to_owned(),
            created_by: member_id,
        })
        .await?;
    store
        .add_project_member(NewProjectMember {
            project_id: project.id,
            account_id: member_id,
            position: MemberPosition::Secondary,
            created_by: member_id,
        })
        .await?;
    store.grant_role(admin_id, AppRole::Admin, admin_id).await?;

    Ok(Fixture {
        engine: PolicyEngine::new(store),
        project_id: project.id,
        member_id,
        outsider_id,
        admin_id,
    })
}

fn final_account(project_id: Uuid, created_by: Uuid) -> ResourceRef {
    ResourceRef::new(ResourceKind::FinalAccount, Uuid::new_v4())
        .in_project(project_id)
        .owned_by(created_by)
}

async fn issue_token(
    store: &MemStore,
    project_id: Uuid,
    kind: TokenKind,
    expires_at: Option<Timestamp>,
) -> AuthzResult<sitebase_store::model::ShareToken> {
    Ok(store
        .issue_share_token(NewShareToken {
            kind,
            project_id,
            token: None,
            allow_comments: Some(true),
            expires_at,
            created_by: Uuid::new_v4(),
        })
        .await?)
}

#[tokio::test]
async fn member_gated_select_matches_membership_or_admin() -> AuthzResult<()> {
    let fx = fixture().await?;
    let resource = final_account(fx.project_id, fx.member_id);

    // allow(P, R, select) == is_project_member(P, project) OR has_role(P, admin)
    for account_id in [fx.member_id, fx.outsider_id, fx.admin_id] {
        let expected = fx.engine.is_project_member(account_id, fx.project_id).await?
            || fx.engine.has_role(account_id, AppRole::Admin).await?;
        let decision = fx
            .engine
            .evaluate(
                &RequestContext::authenticated(account_id),
                &resource,
                Operation::Select,
            )
            .await?;
        assert_eq!(decision.is_allowed(), expected);
    }

    let anonymous = fx
        .engine
        .evaluate(&RequestContext::anonymous(), &resource, Operation::Select)
        .await?;
    assert_eq!(anonymous, Decision::Deny);
    Ok(())
}

#[tokio::test]
async fn admin_without_membership_passes_member_gate() -> AuthzResult<()> {
    let fx = fixture().await?;
    assert!(!fx.engine.is_project_member(fx.admin_id, fx.project_id).await?);

    let resource = final_account(fx.project_id, fx.member_id);
    fx.engine
        .authorize(
            &RequestContext::authenticated(fx.admin_id),
            &resource,
            Operation::Select,
        )
        .await?;
    Ok(())
}

#[tokio::test]
async fn denied_write_is_uniform_error() -> AuthzResult<()> {
    let fx = fixture().await?;
    let resource = final_account(fx.project_id, fx.member_id);

    let err = fx
        .engine
        .authorize(
            &RequestContext::authenticated(fx.outsider_id),
            &resource,
            Operation::Delete,
        )
        .await
        .unwrap_err();
    assert!(err.is_denied());
    assert_eq!(err.to_string(), "Access denied");
    Ok(())
}

#[tokio::test]
async fn anonymous_portal_token_reads_its_project_only() -> AuthzResult<()> {
    let fx = fixture().await?;
    let other_project = fx
        .engine
        .store()
        .create_project(NewProject {
            name: "Harbour offices".to_owned(),
            reference: "HO-22".to_owned(),
            created_by: fx.member_id,
        })
        .await?;

    let token = issue_token(
        fx.engine.store(),
        fx.project_id,
        TokenKind::ClientPortal,
        None,
    )
    .await?;
    let ctx = RequestContext::anonymous().with_share_token(token.token.clone());

    let project_x = ResourceRef::new(ResourceKind::Project, fx.project_id)
        .in_project(fx.project_id)
        .owned_by(fx.member_id);
    let project_y = ResourceRef::new(ResourceKind::Project, other_project.id)
        .in_project(other_project.id)
        .owned_by(fx.member_id);

    assert_eq!(
        fx.engine.evaluate(&ctx, &project_x, Operation::Select).await?,
        Decision::Allow
    );
    assert_eq!(
        fx.engine.evaluate(&ctx, &project_y, Operation::Select).await?,
        Decision::Deny
    );

    // Reading is all a portal token grants on the project row.
    assert_eq!(
        fx.engine.evaluate(&ctx, &project_x, Operation::Update).await?,
        Decision::Deny
    );
    Ok(())
}

#[tokio::test]
async fn expired_and_revoked_tokens_are_denied() -> AuthzResult<()> {
    let fx = fixture().await?;

    let expired = issue_token(
        fx.engine.store(),
        fx.project_id,
        TokenKind::ClientPortal,
        Some(Timestamp::now() + Span::new().milliseconds(200)),
    )
    .await?;
    // Let the short-lived token lapse.
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    assert!(!fx
        .engine
        .has_valid_share_token(fx.project_id, &expired.token)
        .await?);

    let revoked = issue_token(
        fx.engine.store(),
        fx.project_id,
        TokenKind::ContractorPortal,
        None,
    )
    .await?;
    assert!(fx
        .engine
        .has_valid_share_token(fx.project_id, &revoked.token)
        .await?);
    fx.engine.store().revoke_share_token(revoked.id).await?;
    assert!(!fx
        .engine
        .has_valid_share_token(fx.project_id, &revoked.token)
        .await?);

    let project = ResourceRef::new(ResourceKind::Project, fx.project_id)
        .in_project(fx.project_id)
        .owned_by(fx.member_id);
    for bearer in [&expired.token, &revoked.token] {
        let ctx = RequestContext::anonymous().with_share_token(bearer.clone());
        assert_eq!(
            fx.engine.evaluate(&ctx, &project, Operation::Select).await?,
            Decision::Deny
        );
    }
    Ok(())
}

#[tokio::test]
async fn contractor_portal_token_is_independently_sufficient() -> AuthzResult<()> {
    let fx = fixture().await?;
    let token = issue_token(
        fx.engine.store(),
        fx.project_id,
        TokenKind::ContractorPortal,
        None,
    )
    .await?;

    let ctx = RequestContext::anonymous().with_share_token(token.token);
    let document = ResourceRef::new(ResourceKind::Document, Uuid::new_v4())
        .in_project(fx.project_id)
        .owned_by(fx.member_id);
    assert_eq!(
        fx.engine.evaluate(&ctx, &document, Operation::Select).await?,
        Decision::Allow
    );
    Ok(())
}

#[tokio::test]
async fn roadmap_token_reads_tasks_but_not_documents() -> AuthzResult<()> {
    let fx = fixture().await?;
    let token = issue_token(
        fx.engine.store(),
        fx.project_id,
        TokenKind::RoadmapShare,
        None,
    )
    .await?;
    let ctx = RequestContext::anonymous().with_share_token(token.token);

    let task = ResourceRef::new(ResourceKind::Task, Uuid::new_v4())
        .in_project(fx.project_id)
        .owned_by(fx.member_id);
    let document = ResourceRef::new(ResourceKind::Document, Uuid::new_v4())
        .in_project(fx.project_id)
        .owned_by(fx.member_id);

    assert_eq!(
        fx.engine.evaluate(&ctx, &task, Operation::Select).await?,
        Decision::Allow
    );
    assert_eq!(
        fx.engine.evaluate(&ctx, &document, Operation::Select).await?,
        Decision::Deny
    );
    Ok(())
}

#[tokio::test]
async fn token_contributor_writes_only_rows_tagged_with_its_token() -> AuthzResult<()> {
    let fx = fixture().await?;
    let store = fx.engine.store().clone();
    let token = issue_token(&store, fx.project_id, TokenKind::ClientPortal, None).await?;
    let other_token = issue_token(&store, fx.project_id, TokenKind::ClientPortal, None).await?;
    let ctx = RequestContext::anonymous().with_share_token(token.token.clone());

    // Creating a row tagged with the presented token is allowed.
    let tagged = ResourceRef::new(ResourceKind::DocumentComment, Uuid::new_v4())
        .in_project(fx.project_id)
        .from_token(token.id);
    fx.engine.authorize(&ctx, &tagged, Operation::Insert).await?;

    // Creating a row without the tag, or tagged with someone else's token,
    // is not.
    let untagged = ResourceRef::new(ResourceKind::DocumentComment, Uuid::new_v4())
        .in_project(fx.project_id);
    assert_eq!(
        fx.engine.evaluate(&ctx, &untagged, Operation::Insert).await?,
        Decision::Deny
    );
    let foreign = ResourceRef::new(ResourceKind::DocumentComment, Uuid::new_v4())
        .in_project(fx.project_id)
        .from_token(other_token.id);
    assert_eq!(
        fx.engine.evaluate(&ctx, &foreign, Operation::Insert).await?,
        Decision::Deny
    );

    // Updates and deletes follow the same tag.
    fx.engine.authorize(&ctx, &tagged, Operation::Update).await?;
    fx.engine.authorize(&ctx, &tagged, Operation::Delete).await?;
    assert_eq!(
        fx.engine.evaluate(&ctx, &foreign, Operation::Delete).await?,
        Decision::Deny
    );
    Ok(())
}

#[tokio::test]
async fn comment_authoring_requires_comment_access() -> AuthzResult<()> {
    let fx = fixture().await?;
    let store = fx.engine.store().clone();

    let read_only = store
        .issue_share_token(NewShareToken {
            kind: TokenKind::ClientPortal,
            project_id: fx.project_id,
            token: None,
            allow_comments: Some(false),
            expires_at: None,
            created_by: Uuid::new_v4(),
        })
        .await?;
    let ctx = RequestContext::anonymous().with_share_token(read_only.token.clone());

    let comment = ResourceRef::new(ResourceKind::DocumentComment, Uuid::new_v4())
        .in_project(fx.project_id)
        .from_token(read_only.id);
    assert_eq!(
        fx.engine.evaluate(&ctx, &comment, Operation::Insert).await?,
        Decision::Deny
    );

    // The same tag on a document row is fine: comment access only gates
    // comment authoring.
    let document = ResourceRef::new(ResourceKind::Document, Uuid::new_v4())
        .in_project(fx.project_id)
        .from_token(read_only.id);
    fx.engine.authorize(&ctx, &document, Operation::Insert).await?;
    Ok(())
}

#[tokio::test]
async fn membership_policy_over_its_own_table_is_stable() -> AuthzResult<()> {
    // The membership table's own select rule consults the membership
    // predicate. The predicate reads the table through the raw repository
    // lookup, so evaluation terminates with a stable boolean instead of
    // re-entering the policy.
    let fx = fixture().await?;
    let membership = fx
        .engine
        .store()
        .find_project_member(fx.project_id, fx.member_id)
        .await?
        .unwrap();
    let resource = sitebase_authz::AsResourceRef::resource_ref(&membership);

    for _ in 0..3 {
        let decision = fx
            .engine
            .evaluate(
                &RequestContext::authenticated(fx.member_id),
                &resource,
                Operation::Select,
            )
            .await?;
        assert_eq!(decision, Decision::Allow);
    }

    let outsider = fx
        .engine
        .evaluate(
            &RequestContext::authenticated(fx.outsider_id),
            &resource,
            Operation::Select,
        )
        .await?;
    assert_eq!(outsider, Decision::Deny);
    Ok(())
}

#[tokio::test]
async fn managing_member_required_to_add_members() -> AuthzResult<()> {
    let fx = fixture().await?;
    let store = fx.engine.store().clone();
    let lead_id = Uuid::new_v4();
    store
        .add_project_member(NewProjectMember {
            project_id: fx.project_id,
            account_id: lead_id,
            position: MemberPosition::Primary,
            created_by: fx.member_id,
        })
        .await?;

    let new_row = ResourceRef::new(ResourceKind::ProjectMember, Uuid::new_v4())
        .in_project(fx.project_id)
        .owned_by(lead_id);

    fx.engine
        .authorize(
            &RequestContext::authenticated(lead_id),
            &new_row,
            Operation::Insert,
        )
        .await?;

    // A secondary member can read the roster but not extend it.
    let err = fx
        .engine
        .authorize(
            &RequestContext::authenticated(fx.member_id),
            &new_row,
            Operation::Insert,
        )
        .await
        .unwrap_err();
    assert!(err.is_denied());
    Ok(())
}

#[tokio::test]
async fn role_assignments_are_admin_only() -> AuthzResult<()> {
    let fx = fixture().await?;
    let grant = ResourceRef::new(ResourceKind::RoleAssignment, fx.outsider_id)
        .owned_by(fx.admin_id);

    fx.engine
        .authorize(
            &RequestContext::authenticated(fx.admin_id),
            &grant,
            Operation::Insert,
        )
        .await?;

    let err = fx
        .engine
        .authorize(
            &RequestContext::authenticated(fx.member_id),
            &grant,
            Operation::Insert,
        )
        .await
        .unwrap_err();
    assert!(err.is_denied());
    Ok(())
}

#[tokio::test]
async fn open_catalog_admits_any_authenticated_principal() -> AuthzResult<()> {
    let fx = fixture().await?;
    let entry = ResourceRef::new(ResourceKind::GeneratorModel, Uuid::new_v4());

    for account_id in [fx.member_id, fx.outsider_id, fx.admin_id] {
        fx.engine
            .authorize(
                &RequestContext::authenticated(account_id),
                &entry,
                Operation::Select,
            )
            .await?;
    }

    assert_eq!(
        fx.engine
            .evaluate(&RequestContext::anonymous(), &entry, Operation::Select)
            .await?,
        Decision::Deny
    );
    Ok(())
}

#[tokio::test]
async fn unregistered_kind_fails_closed() -> AuthzResult<()> {
    let store = MemStore::new();
    let engine = PolicyEngine::with_registries(
        store,
        sitebase_authz::PolicyRegistry::empty(),
        sitebase_authz::BucketRegistry::empty(),
    );

    let resource = ResourceRef::new(ResourceKind::Project, Uuid::new_v4());
    assert_eq!(
        engine
            .evaluate(
                &RequestContext::authenticated(Uuid::new_v4()),
                &resource,
                Operation::Select
            )
            .await?,
        Decision::Deny
    );
    Ok(())
}

#[tokio::test]
async fn service_principal_bypasses_every_policy() -> AuthzResult<()> {
    let fx = fixture().await?;
    let ctx = RequestContext::service();
    let resource = final_account(fx.project_id, fx.member_id);

    for op in [
        Operation::Select,
        Operation::Insert,
        Operation::Update,
        Operation::Delete,
    ] {
        fx.engine.authorize(&ctx, &resource, op).await?;
    }
    Ok(())
}

#[tokio::test]
async fn select_filters_silently() -> AuthzResult<()> {
    let fx = fixture().await?;
    let store = fx.engine.store().clone();
    let other_project = store
        .create_project(NewProject {
            name: "Mill conversion".to_owned(),
            reference: "MC-7".to_owned(),
            created_by: fx.outsider_id,
        })
        .await?;

    for project_id in [fx.project_id, other_project.id] {
        store
            .create_document(NewDocument {
                project_id,
                title: "Bar bending schedule".to_owned(),
                storage_key: format!("{project_id}/schedule.pdf"),
                origin_token: None,
                created_by: Some(fx.outsider_id),
            })
            .await?;
    }

    let mut documents = store.list_project_documents(fx.project_id).await?;
    documents.extend(store.list_project_documents(other_project.id).await?);
    assert_eq!(documents.len(), 2);

    let visible = fx
        .engine
        .filter_allowed(&RequestContext::authenticated(fx.member_id), documents)
        .await?;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].project_id, fx.project_id);
    Ok(())
}

#[tokio::test]
async fn evaluation_is_pure_and_redemption_touches_once() -> AuthzResult<()> {
    let fx = fixture().await?;
    let store = fx.engine.store().clone();
    let token = issue_token(&store, fx.project_id, TokenKind::ClientPortal, None).await?;
    let ctx = RequestContext::anonymous().with_share_token(token.token.clone());

    let project = ResourceRef::new(ResourceKind::Project, fx.project_id)
        .in_project(fx.project_id)
        .owned_by(fx.member_id);
    fx.engine.authorize(&ctx, &project, Operation::Select).await?;

    // Policy evaluation never mutates the token row.
    let after_evaluate = store.find_share_token_by_id(token.id).await?.unwrap();
    assert!(after_evaluate.last_used_at.is_none());

    // Redemption does, exactly at the access boundary.
    let grant = fx.engine.redeem_token(&token.token).await?.unwrap();
    assert_eq!(grant.project_id, fx.project_id);
    let after_redeem = store.find_share_token_by_id(token.id).await?.unwrap();
    assert!(after_redeem.last_used_at.is_some());

    // A revoked token no longer redeems.
    store.revoke_share_token(token.id).await?;
    assert!(fx.engine.redeem_token(&token.token).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn bucket_reads_follow_their_tier() -> AuthzResult<()> {
    let fx = fixture().await?;
    let token = issue_token(
        fx.engine.store(),
        fx.project_id,
        TokenKind::ClientPortal,
        None,
    )
    .await?;

    let anonymous = RequestContext::anonymous();
    let member = RequestContext::authenticated(fx.member_id);
    let outsider = RequestContext::authenticated(fx.outsider_id);
    let bearer = RequestContext::anonymous().with_share_token(token.token);

    // Public tier: everyone.
    fx.engine
        .authorize_bucket_read(&anonymous, "branding-assets", None)
        .await?;

    // Authenticated tier: accounts only.
    fx.engine
        .authorize_bucket_read(&outsider, "final-account-exports", None)
        .await?;
    assert!(fx
        .engine
        .authorize_bucket_read(&anonymous, "final-account-exports", None)
        .await
        .unwrap_err()
        .is_denied());

    // Token-gated tier: members, admins and scoped token bearers.
    fx.engine
        .authorize_bucket_read(&member, "project-documents", Some(fx.project_id))
        .await?;
    fx.engine
        .authorize_bucket_read(&bearer, "project-documents", Some(fx.project_id))
        .await?;
    assert!(fx
        .engine
        .authorize_bucket_read(&outsider, "project-documents", Some(fx.project_id))
        .await
        .unwrap_err()
        .is_denied());

    // Unknown buckets fail closed.
    assert!(fx
        .engine
        .authorize_bucket_read(&member, "scratch", Some(fx.project_id))
        .await
        .unwrap_err()
        .is_denied());
    Ok(())
}
