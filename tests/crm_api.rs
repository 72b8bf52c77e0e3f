mod common;

use axum::http::StatusCode;
use common::{TestApp, BOOTSTRAP_TOKEN};
use serde_json::{json, Value};

async fn setup() -> (TestApp, String, i64) {
    let app = TestApp::new(Some(BOOTSTRAP_TOKEN)).await;
    let admin = app.admin_token("acme").await;
    let (_, me) = app.get("/api/auth/me", &admin).await;
    let admin_id = me["user"]["id"].as_i64().unwrap();
    (app, admin, admin_id)
}

fn ids(body: &Value) -> Vec<i64> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn lead_crud_round_trip() {
    let (app, admin, admin_id) = setup().await;

    let input = json!({
        "name": "Jo Park",
        "company": "Parkworks",
        "email": "jo@parkworks.test",
        "phone": "+1 555 010 2030",
        "source": "referral",
        "status": "contacted",
        "value": 1200.5,
        "assignee_id": admin_id,
        "notes": "met at expo"
    });
    let (status, created) = app.post("/api/leads", &admin, input.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = app.get(&format!("/api/leads/{id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    for field in ["name", "company", "email", "phone", "source", "status", "value", "assignee_id", "notes"] {
        assert_eq!(fetched[field], input[field], "{field}");
    }

    let (status, updated) = app
        .put(
            &format!("/api/leads/{id}"),
            &admin,
            json!({ "name": "Jo Park", "status": "qualified", "value": 1500 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "qualified");
    assert_eq!(updated["company"], Value::Null);

    let (_, qualified) = app.get("/api/leads?status=qualified", &admin).await;
    assert_eq!(ids(&qualified), vec![id]);
    let (_, fresh) = app.get("/api/leads?status=new", &admin).await;
    assert!(ids(&fresh).is_empty());

    let (status, body) = app.get("/api/leads?status=bogus", &admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, _) = app.delete(&format!("/api/leads/{id}"), &admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app.get(&format!("/api/leads/{id}"), &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn proposal_round_trip() {
    let (app, admin, admin_id) = setup().await;
    let (_, lead) = app.post("/api/leads", &admin, json!({ "name": "Harbor Inc" })).await;

    let input = json!({
        "title": "Harbor website",
        "lead_id": lead["id"],
        "status": "sent",
        "amount": 4800.25,
        "valid_until": "2026-12-31",
        "assignee_id": admin_id,
        "notes": "two phases"
    });
    let (status, created) = app.post("/api/proposals", &admin, input.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = app.get(&format!("/api/proposals/{id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    for field in ["title", "lead_id", "status", "amount", "valid_until", "assignee_id", "notes"] {
        assert_eq!(fetched[field], input[field], "{field}");
    }

    let (status, body) = app
        .post("/api/proposals", &admin, json!({ "title": "Orphan", "lead_id": 9999 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_reference");
}

#[tokio::test]
async fn employee_round_trip() {
    let (app, admin, _) = setup().await;
    let (_, department) = app
        .post("/api/departments", &admin, json!({ "name": "Design" }))
        .await;
    let (_, designation) = app
        .post(
            "/api/designations",
            &admin,
            json!({ "name": "Designer", "department_id": department["id"] }),
        )
        .await;

    let input = json!({
        "first_name": "Rosa",
        "last_name": "Diaz",
        "email": "rosa@acme.test",
        "phone": "+1 555 010 9999",
        "department_id": department["id"],
        "designation_id": designation["id"],
        "status": "on_leave",
        "hire_date": "2024-03-01",
        "salary": 52000.5
    });
    let (status, created) = app.post("/api/employees", &admin, input.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = app.get(&format!("/api/employees/{id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    for field in [
        "first_name",
        "last_name",
        "email",
        "phone",
        "department_id",
        "designation_id",
        "status",
        "hire_date",
        "salary",
    ] {
        assert_eq!(fetched[field], input[field], "{field}");
    }
}

#[tokio::test]
async fn owners_keep_records_they_replace() {
    let (app, admin, _) = setup().await;
    let (staff_id, staff) = app.user_token("acme", &admin, "Sam", "staff").await;

    let (_, lead) = app.post("/api/leads", &staff, json!({ "name": "Mine" })).await;
    let lead = lead["id"].as_i64().unwrap();
    let (status, updated) = app
        .put(
            &format!("/api/leads/{lead}"),
            &staff,
            json!({ "name": "Mine v2", "status": "contacted" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["assignee_id"], staff_id);

    let (status, fetched) = app.get(&format!("/api/leads/{lead}"), &staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Mine v2");

    let (_, proposal) = app.post("/api/proposals", &staff, json!({ "title": "Quote" })).await;
    let proposal = proposal["id"].as_i64().unwrap();
    let (status, updated) = app
        .put(
            &format!("/api/proposals/{proposal}"),
            &staff,
            json!({ "title": "Quote v2", "amount": 10.5 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["assignee_id"], staff_id);

    let (user_id, user) = app.user_token("acme", &admin, "Uma", "user").await;
    let (_, task) = app
        .post("/api/tasks", &admin, json!({ "title": "Yours", "assignee_id": user_id }))
        .await;
    let task = task["id"].as_i64().unwrap();
    let (status, updated) = app
        .put(&format!("/api/tasks/{task}"), &user, json!({ "title": "Yours", "status": "done" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["assignee_id"], user_id);
    let (status, _) = app.get(&format!("/api/tasks/{task}"), &user).await;
    assert_eq!(status, StatusCode::OK);

    // Roles that see everything replace the assignee as sent
    let (status, updated) = app
        .put(&format!("/api/leads/{lead}"), &admin, json!({ "name": "Mine v3" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["assignee_id"], Value::Null);
}

#[tokio::test]
async fn invalid_input_reports_field() {
    let (app, admin, _) = setup().await;

    let (status, body) = app
        .post("/api/leads", &admin, json!({ "name": "Jo", "email": "jo-at-nowhere" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "email");

    let (status, body) = app
        .post(
            "/api/projects",
            &admin,
            json!({ "name": "Rollout", "start_date": "2026-05-01", "end_date": "2026-04-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "end_date");

    let (status, body) = app.post("/api/tasks", &admin, json!({ "title": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, body) = app
        .post("/api/tasks", &admin, json!({ "title": "Call back", "project_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_reference");
}

#[tokio::test]
async fn staff_only_reach_their_own_leads() {
    let (app, admin, admin_id) = setup().await;
    let (staff_id, staff) = app.user_token("acme", &admin, "Sam", "staff").await;

    let (_, theirs) = app
        .post("/api/leads", &admin, json!({ "name": "Big Co", "assignee_id": admin_id }))
        .await;
    let theirs = theirs["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/api/leads/{theirs}"), &staff).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = app
        .put(&format!("/api/leads/{theirs}"), &staff, json!({ "name": "Mine now" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete(&format!("/api/leads/{theirs}"), &staff).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, mine) = app.post("/api/leads", &staff, json!({ "name": "Small Co" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(mine["assignee_id"], staff_id);
    let mine = mine["id"].as_i64().unwrap();

    let (_, listed) = app.get("/api/leads", &staff).await;
    assert_eq!(ids(&listed), vec![mine]);
    let (_, everything) = app.get("/api/leads", &admin).await;
    assert_eq!(everything["items"].as_array().unwrap().len(), 2);

    let (status, _) = app.get("/api/users", &staff).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn users_role_sees_only_assigned_tasks() {
    let (app, admin, _) = setup().await;
    let (user_id, user) = app.user_token("acme", &admin, "Uma", "user").await;

    app.post("/api/tasks", &admin, json!({ "title": "Unassigned" })).await;
    let (_, assigned) = app
        .post("/api/tasks", &admin, json!({ "title": "Yours", "assignee_id": user_id }))
        .await;

    let (status, listed) = app.get("/api/tasks", &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&listed), vec![assigned["id"].as_i64().unwrap()]);

    let (status, _) = app.post("/api/tasks", &user, json!({ "title": "Nope" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/leads", &user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn pipeline_conversions() {
    let (app, admin, admin_id) = setup().await;

    let (_, lead) = app
        .post(
            "/api/leads",
            &admin,
            json!({ "name": "Jo", "company": "Parkworks", "value": 4000, "assignee_id": admin_id }),
        )
        .await;
    let lead_id = lead["id"].as_i64().unwrap();

    let (status, proposal) = app
        .post(&format!("/api/leads/{lead_id}/convert"), &admin, json!({}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(proposal["status"], "draft");
    assert_eq!(proposal["lead_id"], lead_id);
    assert_eq!(proposal["amount"], 4000.0);
    let proposal_id = proposal["id"].as_i64().unwrap();

    let (_, lead) = app.get(&format!("/api/leads/{lead_id}"), &admin).await;
    assert_eq!(lead["status"], "proposal");

    let (status, body) = app
        .post(&format!("/api/proposals/{proposal_id}/convert"), &admin, json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    let (status, _) = app
        .put(
            &format!("/api/proposals/{proposal_id}"),
            &admin,
            json!({ "title": proposal["title"], "lead_id": lead_id, "status": "accepted", "amount": 4000 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, project) = app
        .post(&format!("/api/proposals/{proposal_id}/convert"), &admin, json!({}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["status"], "planning");
    assert_eq!(project["client"], "Parkworks");
    assert_eq!(project["budget"], 4000.0);
}

#[tokio::test]
async fn referenced_departments_cannot_be_deleted() {
    let (app, admin, _) = setup().await;

    let (status, department) = app
        .post("/api/departments", &admin, json!({ "name": "Engineering" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let department_id = department["id"].as_i64().unwrap();

    let (status, body) = app
        .post("/api/departments", &admin, json!({ "name": "Engineering" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    let (status, designation) = app
        .post(
            "/api/designations",
            &admin,
            json!({ "name": "Engineer", "department_id": department_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, employee) = app
        .post(
            "/api/employees",
            &admin,
            json!({
                "first_name": "Lin",
                "last_name": "Ode",
                "email": "lin@acme.test",
                "department_id": department_id,
                "designation_id": designation["id"],
                "hire_date": "2025-09-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(employee["status"], "active");

    let (status, _) = app.delete(&format!("/api/departments/{department_id}"), &admin).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, listed) = app
        .get(&format!("/api/employees?department_id={department_id}"), &admin)
        .await;
    assert_eq!(listed["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn user_management_rules() {
    let (app, admin, admin_id) = setup().await;
    let (manager_id, manager) = app.user_token("acme", &admin, "Max", "manager").await;
    let (staff_id, staff) = app.user_token("acme", &admin, "Sam", "staff").await;

    let (status, body) = app.delete(&format!("/api/users/{admin_id}"), &admin).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "self_delete");

    // Own profile edits are fine, promoting yourself is not
    let (status, _) = app
        .put(
            &format!("/api/users/{staff_id}"),
            &staff,
            json!({ "name": "Samira", "email": "sam@acme.test", "role": "staff" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .put(
            &format!("/api/users/{staff_id}"),
            &staff,
            json!({ "name": "Samira", "email": "sam@acme.test", "role": "admin" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(
            &format!("/api/users/{staff_id}"),
            &manager,
            json!({ "name": "Samira", "email": "sam@acme.test", "role": "manager" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(
            "/api/users",
            &admin,
            json!({ "name": "Dup", "email": "sam@acme.test", "role": "user", "password": "password-123" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, _) = app.delete(&format!("/api/users/{manager_id}"), &admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get("/api/dashboard", &manager).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn route_access_checks() {
    let (app, admin, _) = setup().await;
    let (_, staff) = app.user_token("acme", &admin, "Sam", "staff").await;

    let (status, body) = app.get("/api/access/route?path=/users", &staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);

    let (_, body) = app.get("/api/access/route?path=/leads/12/edit", &staff).await;
    assert_eq!(body["allowed"], true);

    let (_, body) = app.get("/api/access/route?path=/settings/profile", &staff).await;
    assert_eq!(body["allowed"], true);
    assert_eq!(body["required"], json!([]));

    let (_, body) = app.get("/api/access/route?path=/users", &admin).await;
    assert_eq!(body["allowed"], true);
}

#[tokio::test]
async fn dashboard_counts_what_the_caller_can_see() {
    let (app, admin, admin_id) = setup().await;
    let (_, staff) = app.user_token("acme", &admin, "Sam", "staff").await;

    app.post("/api/leads", &admin, json!({ "name": "A", "value": 100, "assignee_id": admin_id }))
        .await;
    app.post(
        "/api/leads",
        &admin,
        json!({ "name": "B", "value": 500, "status": "won", "assignee_id": admin_id }),
    )
    .await;
    app.post("/api/tasks", &admin, json!({ "title": "T", "status": "in_progress" }))
        .await;

    let (status, summary) = app.get("/api/dashboard", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["leads"]["total"], 2);
    assert_eq!(summary["leads"]["open_pipeline_value"], 100.0);
    assert_eq!(summary["leads"]["won_value"], 500.0);
    assert_eq!(summary["leads"]["by_status"]["won"], 1);
    assert_eq!(summary["tasks"]["by_status"]["in_progress"], 1);

    let (status, summary) = app.get("/api/dashboard", &staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["leads"]["total"], 0);
    assert_eq!(summary["tasks"]["total"], 0);
}

#[tokio::test]
async fn tenants_are_isolated() {
    let (app, acme_admin, _) = setup().await;
    let globex_admin = app.admin_token("globex").await;

    app.post("/api/departments", &acme_admin, json!({ "name": "Sales" })).await;
    let (_, globex) = app.get("/api/departments", &globex_admin).await;
    assert!(ids(&globex).is_empty());
    let (_, acme) = app.get("/api/departments", &acme_admin).await;
    assert_eq!(ids(&acme).len(), 1);
}
