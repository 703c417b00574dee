//! Deepfake detection for still images and short videos.
//!
//! A [`pipeline::deepfake_analyzer::DeepfakeAnalyzer`] is built once from an
//! [`shared::config::AnalyzerConfig`] and answers every request with an
//! [`analysis::domain::analysis_result::AnalysisReport`].

pub mod analysis {
    pub mod domain {
        pub mod analysis_result;
        pub mod edge_detection;
        pub mod face_metrics;
        pub mod frame_classifier;
        pub mod heuristic_face_scorer;
        pub mod pixel_statistics;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod face_detector;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod analyze_image_use_case;
    pub mod analyze_video_use_case;
    pub mod deepfake_analyzer;
    pub mod frame_staging;
    pub mod pipeline_logger;
}

pub mod shared {
    pub mod config;
    pub mod constants;
    pub mod error;
    pub mod frame;
    pub mod media_kind;
    pub mod model_resolver;
    pub mod region;
    pub mod video_metadata;
}

pub mod video {
    pub mod domain {
        pub mod image_writer;
        pub mod video_reader;
    }
    pub mod infrastructure;
}
