use serde_json::json;

use super::{
    client::ApiClient,
    types::{
        ApiError, CreateOvertimeData, CreateOvertimeInput, DeleteOvertimeData, FetchUserData,
        MutationOutcome, OvertimeIdInput, UpdateOvertimeData, UpdateOvertimeInput,
        UserOvertimeData,
    },
};

const CREATE_OVERTIME: &str = r#"
mutation CreateOvertime(
  $date: String!
  $startTime: String!
  $endTime: String!
  $duration: String!
  $description: String!
  $status: String!
  $approverId: String!
) {
  createOvertime(
    date: $date
    startTime: $startTime
    endTime: $endTime
    duration: $duration
    description: $description
    status: $status
    approverId: $approverId
  ) {
    ok
    errors {
      path
      message
    }
  }
}
"#;

const UPDATE_OVERTIME: &str = r#"
mutation UpdateOvertime($id: String!, $status: String!) {
  updateOvertime(id: $id, status: $status) {
    ok
    errors {
      path
      message
    }
  }
}
"#;

const DELETE_OVERTIME: &str = r#"
mutation DeleteOvertime($id: String!) {
  deleteOvertime(id: $id) {
    ok
    errors {
      path
      message
    }
  }
}
"#;

const FETCH_USER_DATA: &str = r#"
query FetchUserData($id: String!) {
  fetchUser(id: $id) {
    user {
      _id
      createdOvertimes {
        _id
        date
        startTime
        endTime
        duration
        description
        status
        approver {
          _id
          firstName
          lastName
          suffix
        }
      }
      assignedOvertimes {
        _id
        date
        startTime
        endTime
        duration
        description
        status
        creator {
          _id
          firstName
          lastName
          suffix
        }
      }
    }
  }
  users {
    _id
    firstName
    lastName
    suffix
  }
}
"#;

impl ApiClient {
    pub async fn create_overtime(
        &self,
        input: CreateOvertimeInput,
    ) -> Result<MutationOutcome, ApiError> {
        let data: CreateOvertimeData = self
            .execute("CreateOvertime", CREATE_OVERTIME, input)
            .await?;
        Ok(data.create_overtime)
    }

    pub async fn update_overtime_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<MutationOutcome, ApiError> {
        let data: UpdateOvertimeData = self
            .execute(
                "UpdateOvertime",
                UPDATE_OVERTIME,
                UpdateOvertimeInput {
                    id: id.to_string(),
                    status: status.to_string(),
                },
            )
            .await?;
        Ok(data.update_overtime)
    }

    pub async fn delete_overtime(&self, id: &str) -> Result<MutationOutcome, ApiError> {
        let data: DeleteOvertimeData = self
            .execute(
                "DeleteOvertime",
                DELETE_OVERTIME,
                OvertimeIdInput { id: id.to_string() },
            )
            .await?;
        Ok(data.delete_overtime)
    }

    pub async fn fetch_user_overtime(&self, user_id: &str) -> Result<UserOvertimeData, ApiError> {
        let data: FetchUserData = self
            .execute("FetchUserData", FETCH_USER_DATA, json!({ "id": user_id }))
            .await?;
        Ok(data.into())
    }
}
