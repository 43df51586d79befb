use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct InspectorRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> InspectorRepository<'a, C> {
    /// Creates a new instance of [`InspectorRepository`]
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::inspector::Model>, DbErr> {
        entity::prelude::Inspector::find()
            .order_by_asc(entity::inspector::Column::Name)
            .all(self.conn)
            .await
    }

    pub async fn get_by_id(
        &self,
        inspector_id: i32,
    ) -> Result<Option<entity::inspector::Model>, DbErr> {
        entity::prelude::Inspector::find_by_id(inspector_id)
            .one(self.conn)
            .await
    }

    /// Returns available inspectors, optionally narrowed to a district and an
    /// inspection-type name. Results come back name-ascending so the caller's
    /// least-load tie-break is deterministic.
    pub async fn list_candidates(
        &self,
        district: Option<&str>,
        inspection_type: Option<&str>,
    ) -> Result<Vec<entity::inspector::Model>, DbErr> {
        let mut query = entity::prelude::Inspector::find()
            .filter(entity::inspector::Column::Available.eq(true));

        if let Some(district) = district {
            query = query.filter(entity::inspector::Column::AssignedDistrict.eq(district));
        }

        if let Some(inspection_type) = inspection_type {
            query = query.filter(entity::inspector::Column::InspectionType.eq(inspection_type));
        }

        query
            .order_by_asc(entity::inspector::Column::Name)
            .all(self.conn)
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        inspection_type: &str,
        assigned_district: &str,
        available: bool,
        work_id: Option<&str>,
    ) -> Result<entity::inspector::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let inspector = entity::inspector::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            inspection_type: ActiveValue::Set(inspection_type.to_string()),
            assigned_district: ActiveValue::Set(assigned_district.to_string()),
            available: ActiveValue::Set(available),
            work_id: ActiveValue::Set(work_id.map(str::to_string)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        inspector.insert(self.conn).await
    }
}

pub struct InspectionTypeRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> InspectionTypeRepository<'a, C> {
    /// Creates a new instance of [`InspectionTypeRepository`]
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(
        &self,
        type_id: i32,
    ) -> Result<Option<entity::inspection_type::Model>, DbErr> {
        entity::prelude::InspectionType::find_by_id(type_id)
            .one(self.conn)
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<entity::inspection_type::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let inspection_type = entity::inspection_type::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(description.map(str::to_string)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        inspection_type.insert(self.conn).await
    }
}
